pub mod member;
pub mod member_snapshot;

pub use member::Member;
pub use member_snapshot::MemberSnapshot;
