pub(crate) mod ba_;
pub(crate) mod bo_;
pub(crate) mod sg_;
pub(crate) mod strings;
pub(crate) mod val_;
