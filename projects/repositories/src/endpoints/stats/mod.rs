pub mod count_repositories;
pub mod top_list;
