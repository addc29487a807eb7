// Page state
// Category selection and copy feedback

pub mod feedback;
pub mod filter;
