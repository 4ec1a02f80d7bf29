// REST API over the recipe store and the search provider

pub mod handlers;
pub mod models;
pub mod routes;
