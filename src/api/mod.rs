pub mod client;
pub mod types;

pub use client::{FetchError, RosterClient};
pub use types::{ClanInfo, League, MembersResponse, RawMember};
