//! List mechanics shared by every per-date widget.
//!
//! Every operation edits a list in place; the caller persists the whole state
//! afterwards, so a failed operation leaves nothing written.

use crate::errors::ValidationError;
use uuid::Uuid;

pub trait Record {
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Submitted form data for a record kind.
pub trait Form {
    type Output: Record + Clone;

    fn validate(&self) -> Result<(), ValidationError>;

    fn build(self, id: String) -> Self::Output;
}

pub fn add<F: Form>(list: &mut Vec<F::Output>, form: F) -> Result<F::Output, ValidationError> {
    form.validate()?;
    let record = form.build(new_id());
    list.push(record.clone());
    Ok(record)
}

/// Replaces the record with `id`, keeping the id.
pub fn edit<F: Form>(
    list: &mut Vec<F::Output>,
    id: &str,
    form: F,
) -> Result<F::Output, ValidationError> {
    find(list.as_slice(), id)?;
    form.validate()?;
    let record = form.build(id.to_string());
    upsert(list, record.clone());
    Ok(record)
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Appends `record`, or replaces the entry with the same id.
pub fn upsert<R: Record>(list: &mut Vec<R>, record: R) {
    match list.iter_mut().find(|existing| existing.id() == record.id()) {
        Some(slot) => *slot = record,
        None => list.push(record),
    }
}

pub fn find<'a, R: Record>(list: &'a [R], id: &str) -> Result<&'a R, ValidationError> {
    list.iter()
        .find(|record| record.id() == id)
        .ok_or_else(|| unknown::<R>(id))
}

pub fn find_mut<'a, R: Record>(list: &'a mut [R], id: &str) -> Result<&'a mut R, ValidationError> {
    list.iter_mut()
        .find(|record| record.id() == id)
        .ok_or_else(|| unknown::<R>(id))
}

pub fn remove<R: Record>(list: &mut Vec<R>, id: &str) -> Result<R, ValidationError> {
    let index = list
        .iter()
        .position(|record| record.id() == id)
        .ok_or_else(|| unknown::<R>(id))?;
    Ok(list.remove(index))
}

fn unknown<R: Record>(id: &str) -> ValidationError {
    ValidationError::UnknownRecord {
        kind: R::KIND,
        id: id.to_string(),
    }
}

pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Rounds halves towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    round_half_up(part as f64 / total as f64 * 100.0) as u32
}
