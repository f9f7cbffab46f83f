use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::err::{Error, invalid_field};
use crate::filter::{ComparisonMap, Fragment};
use crate::model::{FieldType, FilterKind};

/// A function which builds the filter of a field from its comparison map.
pub type CustomFilter =
	Arc<dyn Fn(&str, &ComparisonMap) -> Result<Fragment, Error> + Send + Sync + 'static>;

/// Static metadata for one model field.
#[derive(Clone)]
pub struct FieldSpec {
	ty: FieldType,
	required: bool,
	doc: Option<String>,
	filter_kind: Option<FilterKind>,
	create_filter: bool,
	create_order_by: bool,
	custom_filter: Option<CustomFilter>,
}

impl FieldSpec {
	pub fn new(ty: FieldType) -> Self {
		Self {
			ty,
			required: true,
			doc: None,
			filter_kind: None,
			create_filter: true,
			create_order_by: true,
			custom_filter: None,
		}
	}

	pub fn int() -> Self {
		Self::new(FieldType::Int)
	}

	pub fn float() -> Self {
		Self::new(FieldType::Float)
	}

	pub fn string() -> Self {
		Self::new(FieldType::String)
	}

	pub fn boolean() -> Self {
		Self::new(FieldType::Boolean)
	}

	/// An enum field, which needs at least one value
	pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Result<Self, Error>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let name = name.into();
		let values: Vec<String> = values.into_iter().map(Into::into).collect();
		if values.is_empty() {
			return Err(invalid_field(&name, format!("enum values must be provided for {name}")));
		}
		Ok(Self::new(FieldType::Enum {
			name,
			values,
		}))
	}

	pub fn list(element: FieldType) -> Self {
		Self::new(FieldType::List(Box::new(element)))
	}

	pub fn object(name: impl Into<String>) -> Self {
		Self::new(FieldType::Object(name.into()))
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn optional(self) -> Self {
		self.required(false)
	}

	/// Set the comment emitted above the field in the SDL
	pub fn doc(mut self, doc: impl Into<String>) -> Self {
		self.doc = Some(doc.into());
		self
	}

	pub fn filter_kind(mut self, kind: FilterKind) -> Self {
		self.filter_kind = Some(kind);
		self
	}

	pub fn create_filter(mut self, create: bool) -> Self {
		self.create_filter = create;
		self
	}

	pub fn create_order_by(mut self, create: bool) -> Self {
		self.create_order_by = create;
		self
	}

	/// Replace the built-in translation of this field's filter
	pub fn custom_filter<F>(mut self, f: F) -> Self
	where
		F: Fn(&str, &ComparisonMap) -> Result<Fragment, Error> + Send + Sync + 'static,
	{
		self.custom_filter = Some(Arc::new(f));
		self
	}

	pub fn ty(&self) -> &FieldType {
		&self.ty
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	pub fn schema_doc(&self) -> Option<&str> {
		self.doc.as_deref()
	}

	/// The declared filter kind, or the default one for the field type
	pub fn effective_filter_kind(&self) -> Option<FilterKind> {
		self.filter_kind.clone().or_else(|| self.ty.default_filter_kind())
	}

	pub fn is_filterable(&self) -> bool {
		self.create_filter
	}

	pub fn is_sortable(&self) -> bool {
		self.create_order_by
	}

	pub fn get_custom_filter(&self) -> Option<&CustomFilter> {
		self.custom_filter.as_ref()
	}
}

impl Debug for FieldSpec {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldSpec")
			.field("ty", &self.ty)
			.field("required", &self.required)
			.field("doc", &self.doc)
			.field("filter_kind", &self.filter_kind)
			.field("create_filter", &self.create_filter)
			.field("create_order_by", &self.create_order_by)
			.field("custom_filter", &self.custom_filter.is_some())
			.finish()
	}
}
