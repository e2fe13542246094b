use ds_io::{copy, EntryBuffer, EntryReader, EntryWriter};
use tracing::{debug, warn};

use crate::error::{ValidateError, ValidateResult};
use crate::schema::{JsonSchema, SchemaValidator, ValidationFault};

/// Drain `reader` into a JSON buffer and validate the buffered body.
///
/// The buffer is closed even when reading fails. Read and write failures
/// name the record they happened at.
pub fn validate_entries<R, V>(
    reader: &mut R,
    validator: &V,
) -> ValidateResult<Vec<ValidationFault>>
where
    R: EntryReader + ?Sized,
    V: SchemaValidator + ?Sized,
{
    let mut buf = EntryBuffer::new(reader.structure())?;
    let copied = copy(reader, &mut buf);
    let closed = buf.close();
    let entries = copied?;
    closed?;
    check_buffer(buf.bytes(), entries, validator)
}

/// Validate the body of `reader` against the schema of its own structure.
pub fn validate_structure_entries<R>(reader: &mut R) -> ValidateResult<Vec<ValidationFault>>
where
    R: EntryReader + ?Sized,
{
    let schema = reader
        .structure()
        .schema
        .as_ref()
        .ok_or(ValidateError::MissingSchema)?;
    let compiled = JsonSchema::compile(schema)?;
    validate_entries(reader, &compiled)
}

fn check_buffer<V>(
    data: &[u8],
    entries: usize,
    validator: &V,
) -> ValidateResult<Vec<ValidationFault>>
where
    V: SchemaValidator + ?Sized,
{
    if data.is_empty() {
        return Err(ValidateError::EmptyBuffer);
    }
    let faults = validator.validate_bytes(data);
    if faults.is_empty() {
        debug!(entries, "body is valid");
    } else {
        warn!(entries, violations = faults.len(), "body violates its schema");
    }
    Ok(faults)
}
