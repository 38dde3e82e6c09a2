//! Record schemas and field extraction
//!
//! Rust has no runtime reflection, so a record type describes its columns
//! once through a [`Schema`]: an ordered list of named fields, each bound to
//! an accessor closure. Extraction filters that list; the engine reads every
//! cell through the bound accessors.
//!
//! ```rust
//! use sheetforge::{record, FieldValue, Record};
//!
//! struct Product {
//!     product_id: i32,
//!     name: String,
//!     price: f64,
//! }
//!
//! record!(Product {
//!     "ProductId" => product_id,
//!     "Name" => name,
//!     "Price" => price,
//! });
//!
//! let schema = Product::schema();
//! let fields = sheetforge::extract(&schema, true);
//! let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
//! assert_eq!(names, ["Name", "Price"]);
//!
//! let bolt = Product { product_id: 1, name: "Bolt".into(), price: 0.25 };
//! assert_eq!(fields[1].read(&bolt), FieldValue::F64(0.25));
//! ```

use std::fmt;

use crate::value::{DeclaredType, FieldType, FieldValue};

type Accessor<R> = Box<dyn Fn(&R) -> FieldValue + Send + Sync>;

/// A type that can be exported as sheet rows
pub trait Record: Sized {
    /// Describe the record's fields, in column order
    fn schema() -> Schema<Self>;
}

/// Ordered field list of a record type
pub struct Schema<R> {
    type_name: String,
    fields: Vec<FieldDescriptor<R>>,
}

impl<R> Schema<R> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a readable field
    pub fn field<T, F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        T: FieldType,
        F: Fn(&R) -> T + Send + Sync + 'static,
    {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            declared: DeclaredType::of::<T>(),
            accessor: Some(Box::new(move |record: &R| accessor(record).to_field_value())),
        });
        self
    }

    /// Add a field that has no public reader; extraction skips it
    pub fn write_only<T: FieldType>(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            declared: DeclaredType::of::<T>(),
            accessor: None,
        });
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// All declared fields, readable or not
    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// One field of a record type: name, declared type and bound reader
pub struct FieldDescriptor<R> {
    name: String,
    declared: DeclaredType,
    accessor: Option<Accessor<R>>,
}

impl<R> FieldDescriptor<R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> DeclaredType {
        self.declared
    }

    pub fn is_readable(&self) -> bool {
        self.accessor.is_some()
    }

    /// Read the field; unreadable fields read as null
    pub fn read(&self, record: &R) -> FieldValue {
        match &self.accessor {
            Some(accessor) => accessor(record),
            None => FieldValue::Null,
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("readable", &self.is_readable())
            .finish()
    }
}

/// Exportable fields of a schema, in declaration order
///
/// Only readable fields are kept. With `exclude_id_fields`, fields whose name
/// ends in "id" (any case) are dropped as well.
pub fn extract<R>(schema: &Schema<R>, exclude_id_fields: bool) -> Vec<&FieldDescriptor<R>> {
    schema
        .fields()
        .iter()
        .filter(|f| f.is_readable())
        .filter(|f| !(exclude_id_fields && is_id_field(f.name())))
        .collect()
}

/// Naming heuristic: `ProductId`, `CategoryID`, `id`
pub fn is_id_field(name: &str) -> bool {
    let mut tail = name.chars().rev();
    matches!(
        (tail.next(), tail.next()),
        (Some('d' | 'D'), Some('i' | 'I'))
    )
}

/// Human-readable column label
///
/// Inserts a space at every lowercase-to-uppercase transition:
/// `ProductName` becomes `Product Name`. Uppercase runs and digits never
/// split, so `PRODUCTNAME` and `Product2Price` are unchanged.
///
/// Case follows Unicode, not just ASCII: `straßeName` becomes
/// `straße Name`. Characters without case, such as CJK ideographs, never
/// start a new word.
pub fn format_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if prev_lower && ch.is_uppercase() {
            label.push(' ');
        }
        label.push(ch);
        prev_lower = ch.is_lowercase();
    }
    label
}

/// Implement [`Record`] for a struct from `"Name" => field` pairs
///
/// Each field is read by cloning it, so field types must be `Clone` and
/// implement [`FieldType`].
#[macro_export]
macro_rules! record {
    ($ty:ty { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn schema() -> $crate::Schema<Self> {
                $crate::Schema::new(stringify!($ty))
                    $(.field($name, |r: &$ty| ::core::clone::Clone::clone(&r.$field)))*
            }
        }
    };
}
