pub mod query_dtos;
