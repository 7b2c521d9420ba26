use crate::{
    ast::{Expr, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::f64_to_index,
};

impl Context {
    /// Evaluates `array[index]`.
    ///
    /// The index is evaluated before the array.
    ///
    /// # Errors
    /// - `ExpectedArray` if the target is not an array.
    /// - `InvalidIndex` / `IndexOutOfBounds` if the index is unusable.
    pub(crate) fn eval_index(&mut self, array: &Expr, index: &Expr, pos: Position)
                             -> EvalResult<Value> {
        let index_value = self.eval(index)?;
        let target = self.eval(array)?;

        let elements = target.as_array(array.tracked_name(), pos)?;
        let i = index_of(&index_value, index.position())?;

        element_at(elements, i, &label(array.tracked_name(), &target), pos).cloned()
    }

    /// Executes `name[i][j]... = value`.
    ///
    /// Indexes are evaluated left to right, then the value, and only then is
    /// `name` read. The arrays along the path are rebuilt with only the leaf element replaced, and the
    /// rebuilt outer array is assigned back to `name`.
    ///
    /// # Returns
    /// The assigned value.
    ///
    /// # Errors
    /// - `UnknownVariable` if `name` is not bound.
    /// - `ExpectedArray` if any level of the path is not an array.
    /// - `InvalidIndex` / `IndexOutOfBounds` for an unusable index.
    /// - `TypeChange` if the new value's tag differs from the replaced
    ///   element's.
    pub(crate) fn exec_index_assignment(&mut self,
                                        name: &str,
                                        indexes: &[Expr],
                                        value: &Expr,
                                        pos: Position)
                                        -> EvalResult<Value> {
        let mut path = Vec::with_capacity(indexes.len());
        for index in indexes {
            path.push(index_of(&self.eval(index)?, index.position())?);
        }

        let value = self.eval(value)?;

        // Read after evaluating: the indexes or the value may rebind `name`.
        let current = self.get_variable(name)
                          .cloned()
                          .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                                         pos })?;
        let updated = replace_at(&current, name, &path, value.clone(), pos)?;
        self.set_variable(name, updated, pos)?;

        Ok(value)
    }
}

/// Converts an index value to a position in an array.
///
/// # Errors
/// `InvalidIndex` unless the value is a non-negative whole number.
pub fn index_of(index: &Value, pos: Position) -> EvalResult<usize> {
    let position = match index {
        Value::Number(n) => f64_to_index(*n),
        _ => None,
    };

    position.ok_or_else(|| RuntimeError::InvalidIndex { index: index.to_string(),
                                                        pos })
}

/// Borrows `elements[index]`.
///
/// # Errors
/// `IndexOutOfBounds`, naming the array by `array`, if `index` is past the
/// end.
pub fn element_at<'a>(elements: &'a [Value],
                      index: usize,
                      array: &str,
                      pos: Position)
                      -> EvalResult<&'a Value> {
    elements.get(index)
            .ok_or_else(|| RuntimeError::IndexOutOfBounds { array: array.to_string(),
                                                            index,
                                                            len: elements.len(),
                                                            pos })
}

/// Names an array in diagnostics: its variable if known, else its rendering.
pub fn label(name: Option<&str>, value: &Value) -> String {
    name.map_or_else(|| value.to_string(), str::to_string)
}

/// Returns a copy of `target` with the element at `path` replaced.
fn replace_at(target: &Value,
              name: &str,
              path: &[usize],
              value: Value,
              pos: Position)
              -> EvalResult<Value> {
    let Some((&first, rest)) = path.split_first() else {
        return Ok(value);
    };

    let elements = target.as_array(Some(name), pos)?;
    let current = element_at(elements, first, name, pos)?;
    let element_name = format!("{name}[{first}]");

    let replacement = if rest.is_empty() {
        if current.value_type() != value.value_type() {
            return Err(RuntimeError::TypeChange { name: element_name,
                                                  expected: current.value_type(),
                                                  found: value.value_type(),
                                                  pos });
        }
        value
    } else {
        replace_at(current, &element_name, rest, value, pos)?
    };

    let mut rebuilt = elements.to_vec();
    if let Some(slot) = rebuilt.get_mut(first) {
        *slot = replacement;
    }

    Ok(Value::from(rebuilt))
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: Position = Position::new(1, 1);

    #[test]
    fn index_must_be_a_whole_non_negative_number() {
        assert_eq!(index_of(&Value::from(2.0), POS), Ok(2));
        for bad in [Value::from(-1.0), Value::from(0.5), Value::from("0"), Value::Null] {
            assert!(matches!(index_of(&bad, POS), Err(RuntimeError::InvalidIndex { .. })));
        }
    }

    #[test]
    fn replace_rebuilds_only_the_path() {
        let inner = Value::from(vec![Value::from(1.0), Value::from(2.0)]);
        let other = Value::from(vec![Value::from(3.0)]);
        let matrix = Value::from(vec![inner, other.clone()]);

        let updated = replace_at(&matrix, "m", &[0, 1], Value::from(9.0), POS).unwrap();

        assert_eq!(updated.to_string(), "[[1, 9], [3]]");
        assert_eq!(matrix.to_string(), "[[1, 2], [3]]");
        let Value::Array(rows) = updated else {
            panic!("expected an array");
        };
        assert_eq!(rows[1], other);
    }

    #[test]
    fn replace_rejects_a_new_tag() {
        let array = Value::from(vec![Value::from(1.0)]);
        let err = replace_at(&array, "a", &[0], Value::from("x"), POS).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeChange { name, .. } if name == "a[0]"));
    }

    #[test]
    fn replace_out_of_bounds_names_the_array() {
        let array = Value::from(vec![Value::from(1.0)]);
        let err = replace_at(&array, "a", &[3], Value::from(0.0), POS).unwrap_err();
        assert!(matches!(err, RuntimeError::IndexOutOfBounds { array, index: 3, len: 1, .. }
                              if array == "a"));
    }
}
