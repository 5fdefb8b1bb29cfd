mod assignability;
mod inference;
mod parse_type;
