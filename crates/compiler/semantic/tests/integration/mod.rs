mod database;
mod idempotence;
mod properties;
