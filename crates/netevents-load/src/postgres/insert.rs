use sqlx::{PgConnection, Postgres, QueryBuilder};

use netevents_core::{EVENT_COLUMNS, Event};

/// Postgres limit on bind parameters per statement.
pub const MAX_BIND_PARAMS: usize = 65_535;

/// Largest batch a single multi-row insert can carry.
pub const MAX_BATCH_SIZE: usize = MAX_BIND_PARAMS / EVENT_COLUMNS.len();

/// Build a multi-row insert for `events`.
///
/// `event_date` is bound as Unix seconds and converted to a UTC calendar day
/// by the server, independent of either side's local time zone.
pub fn build_insert<'a>(table: &str, events: &'a [Event]) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {table} ({}) ",
        EVENT_COLUMNS.join(", ")
    ));

    builder.push_values(events, |mut row, event| {
        row.push_bind(event.event_source)
            .push_bind(event.event_ref.as_str())
            .push_bind(event.event_type.code())
            .push("(to_timestamp(")
            .push_bind_unseparated(event.occurred_at_unix())
            .push_unseparated("::bigint) AT TIME ZONE 'UTC')::date")
            .push_bind(event.calling_number)
            .push_bind(event.called_number)
            .push_bind(event.location.as_str())
            .push_bind(event.duration_seconds);
        for attr in event.attrs() {
            row.push_bind(attr);
        }
    });

    builder
}

pub async fn insert_batch(
    conn: &mut PgConnection,
    table: &str,
    events: &[Event],
) -> Result<u64, sqlx::Error> {
    if events.is_empty() {
        return Ok(0);
    }

    let mut builder = build_insert(table, events);
    let result = builder.build().execute(&mut *conn).await?;
    Ok(result.rows_affected())
}
