/// Database layer
///
/// - `pool`: PostgreSQL connection pool with health check and graceful close
/// - `migrations`: embedded schema applied at startup
///
/// Entity SQL lives next to the entity types in the `models` module.

pub mod migrations;
pub mod pool;
