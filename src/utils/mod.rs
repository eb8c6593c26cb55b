mod misc;
#[cfg(test)]
pub(crate) mod test_surrogates;

pub use misc::*;
