mod admin;
mod auth;
mod cart;
mod profile;
mod test_utils;
