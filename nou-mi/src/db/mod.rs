//! Member store access for nou-mi

pub mod membres;
