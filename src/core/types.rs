/// Primary key of a record. Derived from the item by a caller-supplied
/// function and must be unique among live records.
pub type Identity = String;

/// Caller-supplied identity callback.
pub type IdentityFn<T> = Box<dyn Fn(&T) -> Identity + Send + Sync>;
