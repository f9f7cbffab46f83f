use crate::err::Error;
use crate::filter::{FieldFilterBuilder, Fragment, WhereExpression, merge};

/// Translate a where expression into a filter document.
///
/// Every field of the node becomes its own fragment, built by `builder`. The
/// `_or` and `_and` children are translated recursively and collected under
/// `$or` and `$and`. Each `_not` child is translated fully, negated key by
/// key, and collected under `$and`. All of these are then merged, so that the
/// conjunctions of siblings are kept side by side.
pub fn translate_where<B>(expr: &WhereExpression, builder: &B) -> Result<Fragment, Error>
where
	B: FieldFilterBuilder + ?Sized,
{
	if expr.is_empty() {
		return Ok(Fragment::new());
	}
	let mut parts = expr
		.fields
		.iter()
		.map(|(field, comparison)| builder.build(field, comparison))
		.collect::<Result<Vec<_>, Error>>()?;
	if !expr.or.is_empty() {
		parts.push(Fragment::disjunction(children(&expr.or, builder)?));
	}
	if !expr.and.is_empty() {
		parts.push(Fragment::conjunction(children(&expr.and, builder)?));
	}
	if !expr.not.is_empty() {
		let negated = children(&expr.not, builder)?.into_iter().map(Fragment::negate).collect();
		parts.push(Fragment::conjunction(negated));
	}
	let out = merge(parts);
	trace!("Translated where expression into {out}");
	Ok(out)
}

fn children<B>(exprs: &[WhereExpression], builder: &B) -> Result<Vec<Fragment>, Error>
where
	B: FieldFilterBuilder + ?Sized,
{
	exprs.iter().map(|e| translate_where(e, builder)).collect()
}
