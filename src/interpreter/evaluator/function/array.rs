use crate::{
    ast::Position,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::exact_args,
            index::{element_at, index_of, label},
        },
        value::core::{Argument, Value},
    },
    util::num::usize_to_f64,
};

/// `index(n, arr)`: returns `arr[n]`.
pub fn index(_: &mut Context, args: &[Argument], pos: Position) -> EvalResult<Value> {
    let [n, array] = exact_args::<2>("index", args, pos)?;
    let elements = array.as_array(pos)?;
    let i = index_of(&n.value, pos)?;

    element_at(elements, i, &label(array.name.as_deref(), &array.value), pos).cloned()
}

/// `setIndex(n, v, arr)`: returns a copy of `arr` with position `n` replaced
/// by `v`, and rebinds it.
pub fn set_index(context: &mut Context, args: &[Argument], pos: Position) -> EvalResult<Value> {
    let [n, value, array] = exact_args::<3>("setIndex", args, pos)?;
    let elements = array.as_array(pos)?;
    let i = index_of(&n.value, pos)?;
    element_at(elements, i, &label(array.name.as_deref(), &array.value), pos)?;

    let mut updated = elements.to_vec();
    if let Some(slot) = updated.get_mut(i) {
        *slot = value.value.clone();
    }

    let updated = Value::from(updated);
    rebind(context, array, &updated, pos)?;
    Ok(updated)
}

/// `push(v, arr)`: returns a copy of `arr` with `v` appended, and rebinds
/// it.
pub fn push(context: &mut Context, args: &[Argument], pos: Position) -> EvalResult<Value> {
    let [value, array] = exact_args::<2>("push", args, pos)?;
    let mut updated = array.as_array(pos)?.to_vec();
    updated.push(value.value.clone());

    let updated = Value::from(updated);
    rebind(context, array, &updated, pos)?;
    Ok(updated)
}

/// `pop(arr)`: removes and returns the last element, and rebinds the
/// shortened array.
///
/// Popping an empty array returns null and leaves it unchanged.
pub fn pop(context: &mut Context, args: &[Argument], pos: Position) -> EvalResult<Value> {
    let [array] = exact_args::<1>("pop", args, pos)?;
    let mut remaining = array.as_array(pos)?.to_vec();

    let Some(last) = remaining.pop() else {
        return Ok(Value::Null);
    };

    rebind(context, array, &Value::from(remaining), pos)?;
    Ok(last)
}

/// `length(arr)`: the number of elements.
pub fn length(_: &mut Context, args: &[Argument], pos: Position) -> EvalResult<Value> {
    let [array] = exact_args::<1>("length", args, pos)?;
    Ok(Value::Number(usize_to_f64(array.as_array(pos)?.len())))
}

/// Stores `updated` in the variable `array` was read from, if any.
fn rebind(context: &mut Context, array: &Argument, updated: &Value, pos: Position) -> EvalResult<()> {
    match &array.name {
        Some(name) => context.set_variable(name, updated.clone(), pos),
        None => Ok(()),
    }
}
