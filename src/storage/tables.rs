use redb::TableDefinition;

/// Random-pick records for the home page: doc id -> { name, image } (msgpack)
pub const ARTIST_INFO: &str = "artist_info";

/// Full artist records for catalog, search and detail pages: doc id -> record (msgpack)
pub const ARTIST_DETAILS: &str = "artist_details";

pub(crate) const KNOWN_TABLES: [&str; 2] = [ARTIST_INFO, ARTIST_DETAILS];

/// Every named table shares one layout: store-assigned u64 doc id -> msgpack record.
pub(crate) fn definition(name: &str) -> TableDefinition<'_, u64, &'static [u8]> {
    TableDefinition::new(name)
}
