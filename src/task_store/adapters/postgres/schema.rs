//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task lifecycle records keyed by client-supplied guid.
    tasks (guid) {
        /// Primary key, unique across the relation.
        #[max_length = 255]
        guid -> Varchar,
        /// Free-form tenant label.
        #[max_length = 255]
        domain -> Varchar,
        /// Creation instant, nanoseconds since epoch.
        created_at -> Int8,
        /// Last write instant, nanoseconds since epoch.
        updated_at -> Int8,
        /// First completion instant; zero until completion.
        first_completed_at -> Int8,
        /// Lifecycle state code.
        state -> Int4,
        /// Bound cell identifier; empty when unbound.
        #[max_length = 255]
        cell_id -> Varchar,
        /// Opaque success payload.
        result -> Nullable<Text>,
        /// Terminal outcome flag.
        failed -> Bool,
        /// Failure cause; empty unless failed.
        #[max_length = 255]
        failure_reason -> Varchar,
        /// Codec-produced definition payload.
        task_definition -> Bytea,
    }
}
