//! Reports Handlers

pub(crate) mod sales;
