//! Diesel schema for host catalog persistence.

diesel::table! {
    /// Catalog sources.
    sources (id) {
        /// Source identifier.
        id -> Uuid,
        /// Model the source serves.
        #[max_length = 255]
        model_id -> Varchar,
        /// Source set the source belongs to.
        #[max_length = 100]
        source_set -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Hosts attached to sources.
    source_hosts (id) {
        /// Insertion-ordered row identifier.
        id -> Int8,
        /// Owning source.
        source_id -> Uuid,
        /// Host base URL in `scheme://host:port` form.
        host_url -> Text,
        /// Attachment timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(source_hosts -> sources (source_id));
diesel::allow_tables_to_appear_in_same_query!(sources, source_hosts);
