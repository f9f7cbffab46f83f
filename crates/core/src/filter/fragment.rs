use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cnf::{AND, NOR, NOT, OR};

/// A translated filter document, or one piece of it.
///
/// Fragments are combined with [`merge`], which keeps every conjunction
/// branch of its inputs. There is deliberately no way to extend one fragment
/// with the keys of another.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fragment(Map<String, Value>);

impl Fragment {
	/// The empty fragment, which matches every document
	pub fn new() -> Self {
		Self::default()
	}

	/// A fragment holding a single condition on one field
	pub fn field(name: impl Into<String>, condition: impl Into<Value>) -> Self {
		let mut m = Map::new();
		m.insert(name.into(), condition.into());
		Self(m)
	}

	/// A conjunction of the given branches, empty if there are none
	pub fn conjunction(branches: Vec<Fragment>) -> Self {
		Self::connective(AND, branches)
	}

	/// A disjunction of the given branches, empty if there are none
	pub fn disjunction(branches: Vec<Fragment>) -> Self {
		Self::connective(OR, branches)
	}

	fn connective(key: &str, branches: Vec<Fragment>) -> Self {
		if branches.is_empty() {
			return Self::new();
		}
		Self::field(key, branches.into_iter().map(Value::from).collect::<Vec<_>>())
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// The conjunction branches held by this fragment
	pub fn branches(&self) -> &[Value] {
		match self.0.get(AND) {
			Some(Value::Array(v)) => v,
			_ => &[],
		}
	}

	/// Negate every top-level key of this fragment individually.
	///
	/// Field conditions are wrapped in `$not`, and a condition which is already
	/// negated is unwrapped instead. A disjunction becomes `$nor` and the other
	/// way round. A conjunction of one branch has that branch negated, while a
	/// longer conjunction is placed under `$nor` as a whole.
	pub fn negate(self) -> Self {
		Self(self.0.into_iter().map(|(k, v)| negate_entry(k, v)).collect())
	}
}

fn negate_entry(key: String, value: Value) -> (String, Value) {
	let branches = match value {
		Value::Array(branches) if [AND, OR, NOR].contains(&key.as_str()) => branches,
		v => return (key, negate_condition(v)),
	};
	match key.as_str() {
		OR => (NOR.to_owned(), Value::Array(branches)),
		NOR => match unwrap_conjunction(branches) {
			Ok(branches) => (AND.to_owned(), Value::Array(branches)),
			Err(branches) => (OR.to_owned(), Value::Array(branches)),
		},
		_ if branches.len() == 1 => {
			(AND.to_owned(), Value::Array(branches.into_iter().map(negate_branch).collect()))
		}
		_ => {
			let all = Value::Object(doc! { AND => branches });
			(NOR.to_owned(), Value::Array(vec![all]))
		}
	}
}

/// The branches of `[{ $and: branches }]`, or the original list
fn unwrap_conjunction(mut branches: Vec<Value>) -> Result<Vec<Value>, Vec<Value>> {
	let single = match branches.as_slice() {
		[Value::Object(o)] => o.len() == 1 && matches!(o.get(AND), Some(Value::Array(_))),
		_ => false,
	};
	if !single {
		return Err(branches);
	}
	match branches.pop() {
		Some(Value::Object(o)) => match o.into_iter().next() {
			Some((_, Value::Array(inner))) => Ok(inner),
			_ => Ok(Vec::new()),
		},
		_ => Ok(Vec::new()),
	}
}

fn negate_branch(branch: Value) -> Value {
	match branch {
		Value::Object(o) => Value::Object(Fragment(o).negate().0),
		v => negate_condition(v),
	}
}

fn negate_condition(condition: Value) -> Value {
	match condition {
		Value::Object(o) if o.len() == 1 && o.contains_key(NOT) => {
			o.into_iter().next().map(|(_, v)| v).unwrap_or_default()
		}
		// A bare value is an implicit equality, which $not cannot wrap
		v if !v.is_object() => Value::Object(doc! { NOT => doc! { "$eq" => v } }),
		v => Value::Object(doc! { NOT => v }),
	}
}

impl From<Map<String, Value>> for Fragment {
	fn from(m: Map<String, Value>) -> Self {
		Self(m)
	}
}

impl From<Fragment> for Value {
	fn from(f: Fragment) -> Self {
		Value::Object(f.0)
	}
}

impl Display for Fragment {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "{}", Value::Object(self.0.clone()))
	}
}

/// Combine fragments without losing any conjunction branch.
///
/// The `$and` lists of all fragments are concatenated in order, and every
/// other key is merged in order with later keys replacing earlier ones. The
/// empty fragment is the identity of this operation.
pub fn merge<I>(fragments: I) -> Fragment
where
	I: IntoIterator<Item = Fragment>,
{
	let mut branches = Vec::new();
	let mut out = Map::new();
	for fragment in fragments {
		for (k, v) in fragment.0 {
			if k == AND {
				match v {
					Value::Array(v) => branches.extend(v),
					v => branches.push(v),
				}
				continue;
			}
			if out.contains_key(&k) {
				debug!("Replacing filter key `{k}` while merging fragments");
			}
			out.insert(k, v);
		}
	}
	if !branches.is_empty() {
		out.insert(AND.to_owned(), Value::Array(branches));
	}
	Fragment(out)
}
