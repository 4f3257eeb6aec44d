use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::entity::location::{self, ActiveModel as LocationActiveModel, Entity as LocationEntity};
use crate::error::Result;

/// Number of positional location slots each user has.
pub const SLOT_COUNT: usize = 4;

/// Exactly [`SLOT_COUNT`] positional slots, each possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSlots([Option<String>; SLOT_COUNT]);

impl LocationSlots {
    pub fn new(slots: [Option<String>; SLOT_COUNT]) -> Self {
        Self(slots)
    }

    /// Builds slots from form input, where an untouched field arrives as an
    /// empty string.
    pub fn from_form<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        fields
            .into_iter()
            .map(|field| Some(field.into()).filter(|value: &String| !value.is_empty()))
            .collect()
    }

    /// Slot at `index` (0-based); `None` when empty or out of range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index)?.as_deref().filter(|value| !value.is_empty())
    }

    /// Iterates all slots in order, yielding `None` for empty ones.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        (0..SLOT_COUNT).map(move |index| self.get(index))
    }

    pub fn as_array(&self) -> &[Option<String>; SLOT_COUNT] {
        &self.0
    }
}

/// Collects up to [`SLOT_COUNT`] entries, padding the rest with `None`.
/// Extra entries are dropped.
impl FromIterator<Option<String>> for LocationSlots {
    fn from_iter<T: IntoIterator<Item = Option<String>>>(iter: T) -> Self {
        let mut slots: [Option<String>; SLOT_COUNT] = Default::default();
        for (slot, value) in slots.iter_mut().zip(iter) {
            *slot = value;
        }
        Self(slots)
    }
}

/// A user's saved locations as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRecord {
    pub username: String,
    pub slots: LocationSlots,
}

impl From<location::Model> for LocationRecord {
    fn from(model: location::Model) -> Self {
        Self {
            username: model.username,
            slots: LocationSlots::new([model.slot1, model.slot2, model.slot3, model.slot4]),
        }
    }
}

/// Access to the `locations` table.
#[derive(Debug, Clone)]
pub struct LocationStore {
    conn: DatabaseConnection,
}

impl LocationStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// The stored record, if `username` has ever saved slots.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<LocationRecord>> {
        let model = LocationEntity::find_by_id(username.to_owned())
            .one(&self.conn)
            .await?;
        Ok(model.map(LocationRecord::from))
    }

    /// Slots for `username`, all empty when nothing has been saved yet.
    pub async fn slots_for(&self, username: &str) -> Result<LocationSlots> {
        Ok(self
            .find_by_username(username)
            .await?
            .map(|record| record.slots)
            .unwrap_or_default())
    }

    /// Replaces all four slots for `username`, creating the row if needed.
    pub async fn upsert(&self, username: &str, slots: LocationSlots) -> Result<()> {
        let [slot1, slot2, slot3, slot4] = slots.0;
        let model = LocationActiveModel {
            username: Set(username.to_owned()),
            slot1: Set(slot1),
            slot2: Set(slot2),
            slot3: Set(slot3),
            slot4: Set(slot4),
        };

        LocationEntity::insert(model)
            .on_conflict(
                OnConflict::column(location::Column::Username)
                    .update_columns([
                        location::Column::Slot1,
                        location::Column::Slot2,
                        location::Column::Slot3,
                        location::Column::Slot4,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        tracing::debug!(username, "saved locations");
        Ok(())
    }

    /// Removes every saved location. Returns the number of rows deleted.
    pub async fn delete_all(&self) -> Result<u64> {
        let result = LocationEntity::delete_many().exec(&self.conn).await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_padded_and_long_input_truncated() {
        let slots: LocationSlots = vec![Some("Paris".to_string())].into_iter().collect();
        assert_eq!(slots.iter().collect::<Vec<_>>(), [Some("Paris"), None, None, None]);

        let slots: LocationSlots = (0..6).map(|i| Some(i.to_string())).collect();
        assert_eq!(slots.get(3), Some("3"));
        assert_eq!(slots.get(4), None);
    }

    #[test]
    fn empty_form_fields_become_empty_slots() {
        let slots = LocationSlots::from_form(["Paris", "", "Tokyo", ""]);
        assert_eq!(
            slots.as_array(),
            &[Some("Paris".to_string()), None, Some("Tokyo".to_string()), None]
        );
    }

    #[test]
    fn stored_empty_strings_read_as_absent() {
        let slots = LocationSlots::new([Some(String::new()), None, Some("Oslo".into()), None]);
        assert_eq!(slots.get(0), None);
        assert_eq!(slots.get(2), Some("Oslo"));
    }
}
