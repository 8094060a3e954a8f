//! Port block allocation for new mappings.
//!
//! Each file mapping is treated as reserving a block of consecutive ports
//! starting at its mapped port. New blocks are handed out at aligned offsets
//! from the bottom of a configured range so the resulting port table stays
//! predictable (36000, 36010, 36020, ...).

mod allocator;
mod error;

pub use allocator::{find_next_available_port_block, reserved_ranges, PortRange};
pub use error::{AllocError, AllocResult};
