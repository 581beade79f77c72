use serde::Deserialize;

/// Member object from the `/clans/{tag}/members` endpoint.
///
/// Field names follow the API's camelCase. Required fields are enforced at
/// deserialization time, so a payload missing one fails the fetch instead of
/// producing a partial record downstream. `league` is genuinely optional:
/// unranked players have no league object at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMember {
    pub tag: String,
    pub name: String,
    pub role: String,
    pub trophies: i32,
    #[serde(default)]
    pub league: Option<League>,
    pub town_hall_level: i32,
    pub donations: i32,
    pub donations_received: i32,
    pub clan_rank: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct League {
    pub id: i64,
    pub name: String,
}

/// Envelope of the member-list endpoint: `{ "items": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct MembersResponse {
    pub items: Vec<RawMember>,
}

/// Subset of the `/clans/{tag}` response used for the connection preflight.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanInfo {
    pub name: String,
    pub members: i32,
    pub clan_level: i32,
}
