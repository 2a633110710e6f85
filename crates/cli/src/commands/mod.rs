pub(crate) mod dashboard;
pub(crate) mod seed;
pub(crate) mod serve;
