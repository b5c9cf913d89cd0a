/// Activation record of one block invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Parameters first, then variables.
    pub slots: Vec<i64>,
    /// Index of the lexically enclosing activation; `None` for the program block.
    pub static_link: Option<usize>,
    /// Where execution resumes after `Return`; `None` for the program block.
    pub return_address: Option<usize>,
}

impl Frame {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(arguments: Vec<i64>, static_link: usize, return_address: usize) -> Self {
        Self {
            slots: arguments,
            static_link: Some(static_link),
            return_address: Some(return_address),
        }
    }
}
