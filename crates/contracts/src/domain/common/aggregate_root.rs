/// Aggregate root: record accessors plus static naming metadata.
pub trait AggregateRoot {
    type Id: PartialEq;

    fn id(&self) -> Self::Id;

    /// Business code of the record (e.g. license number "LIC-2024-001")
    fn code(&self) -> &str;

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Aggregate index in the system (e.g. "a002")
    fn aggregate_index() -> &'static str;

    /// Collection name (e.g. "license")
    fn collection_name() -> &'static str;

    /// UI name of a single element (e.g. "Licença")
    fn element_name() -> &'static str;

    /// Full aggregate name, also the table name (e.g. "a002_license")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
