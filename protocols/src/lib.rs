pub mod chaos;
pub mod axfr;

/// Random transaction id for a new query.
pub fn next_query_id() -> u16 {
    rand::random()
}
