//! Copy-on-write entity proxies.
//!
//! An `Entity` is a cheap proxy around an `Arc<Record>`. Cloning a game
//! allocates a fresh proxy for every entity; each proxy either shares the
//! record ([`Entity::share`]) or owns a deep copy ([`Entity::detach`]).
//! Writes go through [`Entity::write`], which privatizes the record when
//! another proxy still points at it.
//!
//! Proxies are created and mutated by `Game`, which fires the pre- and
//! post-write notifications around each write.

use std::sync::Arc;

use crate::cards::CardDefinition;
use crate::core::{EntityId, PlayerId, Tag, Zone};

use super::record::Record;

/// Proxy over a shared attribute record.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    record: Arc<Record>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, card: Arc<CardDefinition>) -> Self {
        Self {
            id,
            record: Arc::new(Record::new(id, card)),
        }
    }

    /// New proxy sharing this entity's record.
    #[must_use]
    pub(crate) fn share(&self) -> Self {
        Self {
            id: self.id,
            record: Arc::clone(&self.record),
        }
    }

    /// New proxy owning a private copy of this entity's record.
    #[must_use]
    pub(crate) fn detach(&self) -> Self {
        Self {
            id: self.id,
            record: Arc::new(Record::clone(&self.record)),
        }
    }

    /// Privatize if shared, then store `value`. Returns the previous value.
    pub(crate) fn write(&mut self, tag: Tag, value: i64) -> i64 {
        Arc::make_mut(&mut self.record).put(tag, value)
    }

    /// Entity identifier.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Card template this entity was created from.
    #[must_use]
    pub fn card(&self) -> &Arc<CardDefinition> {
        self.record.card()
    }

    /// Attribute value, `0` if unset.
    #[must_use]
    pub fn get(&self, tag: Tag) -> i64 {
        self.record.get(tag)
    }

    /// All stored attributes, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = (Tag, i64)> + '_ {
        self.record.tags()
    }

    /// Number of live proxies sharing this entity's record.
    #[must_use]
    pub fn share_count(&self) -> usize {
        Arc::strong_count(&self.record)
    }

    /// True when this proxy and `other` point at the same record.
    #[must_use]
    pub fn shares_record_with(&self, other: &Entity) -> bool {
        Arc::ptr_eq(&self.record, &other.record)
    }

    /// Controlling player.
    ///
    /// Values outside `0..=254` map to `PlayerId(u8::MAX)`, which is never
    /// a seated player, rather than wrapping onto a real one.
    #[must_use]
    pub fn controller(&self) -> PlayerId {
        let index = u8::try_from(self.get(Tag::Controller)).unwrap_or(u8::MAX);
        PlayerId::new(index)
    }

    /// Current zone.
    #[must_use]
    pub fn zone(&self) -> Zone {
        Zone::from_value(self.get(Tag::Zone))
    }

    /// Position inside the current zone.
    #[must_use]
    pub fn position(&self) -> i64 {
        self.get(Tag::ZonePosition)
    }

    /// True when the entity sits on the shared battlefield.
    #[must_use]
    pub fn is_on_board(&self) -> bool {
        self.zone() == Zone::Play
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn yeti() -> Arc<CardDefinition> {
        Arc::new(
            CardDefinition::new(CardId::new(2), "Yeti")
                .with_tag(Tag::Attack, 4)
                .with_tag(Tag::Health, 5),
        )
    }

    #[test]
    fn test_share_increments_count() {
        let entity = Entity::new(EntityId(4), yeti());
        assert_eq!(entity.share_count(), 1);

        let proxy = entity.share();
        assert_eq!(entity.share_count(), 2);
        assert!(entity.shares_record_with(&proxy));

        drop(proxy);
        assert_eq!(entity.share_count(), 1);
    }

    #[test]
    fn test_write_privatizes_shared_record() {
        let original = Entity::new(EntityId(4), yeti());
        let mut proxy = original.share();

        proxy.write(Tag::Damage, 3);

        assert!(!original.shares_record_with(&proxy));
        assert_eq!(original.share_count(), 1);
        assert_eq!(proxy.share_count(), 1);
        assert_eq!(original.get(Tag::Damage), 0);
        assert_eq!(proxy.get(Tag::Damage), 3);
    }

    #[test]
    fn test_write_in_place_when_unique() {
        let mut entity = Entity::new(EntityId(4), yeti());
        let before = Arc::as_ptr(&entity.record);
        entity.write(Tag::Damage, 1);
        assert_eq!(before, Arc::as_ptr(&entity.record));
    }

    #[test]
    fn test_detach_copies_immediately() {
        let entity = Entity::new(EntityId(4), yeti());
        let copy = entity.detach();

        assert!(!entity.shares_record_with(&copy));
        assert_eq!(entity.share_count(), 1);
        assert_eq!(copy.get(Tag::Attack), 4);
        assert!(Arc::ptr_eq(entity.card(), copy.card()));
    }

    #[test]
    fn test_zone_helpers() {
        let mut entity = Entity::new(EntityId(4), yeti());
        assert_eq!(entity.zone(), Zone::Invalid);
        assert!(!entity.is_on_board());

        entity.write(Tag::Zone, Zone::Play.value());
        entity.write(Tag::ZonePosition, 2);
        entity.write(Tag::Controller, 1);

        assert!(entity.is_on_board());
        assert_eq!(entity.position(), 2);
        assert_eq!(entity.controller(), PlayerId::new(1));
    }

    #[test]
    fn test_controller_out_of_range() {
        let mut entity = Entity::new(EntityId(4), yeti());
        entity.write(Tag::Controller, 257);
        assert_eq!(entity.controller(), PlayerId::new(u8::MAX));
        assert_ne!(entity.controller(), PlayerId::new(1));
    }
}
