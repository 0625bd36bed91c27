pub(crate) mod helpers;
pub(crate) mod intercept;
pub(crate) mod routes;
pub(crate) mod scenarios;
