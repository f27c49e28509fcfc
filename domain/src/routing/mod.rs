//! Topic routing: the static topic table and the selection statistics.

pub mod selection;
pub mod topic;
