use crate::{
    foundation::math::lerp,
    model::keyframe::{KeyValue, Keyframe},
};

/// Distinct property names referenced by `keyframes`, in first-seen order.
pub fn animated_properties(keyframes: &[Keyframe]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for k in keyframes {
        if !names.contains(&k.property.as_str()) {
            names.push(&k.property);
        }
    }
    names
}

/// Value of `property` at layer-local time `local`, or `None` when no
/// keyframe animates it.
///
/// Keyframes with non-finite times are ignored. Before the first and after
/// the last keyframe the value is held. Numbers interpolate with the easing
/// of the later keyframe; other values switch over at half progress.
pub fn sample(keyframes: &[Keyframe], property: &str, local: f64) -> Option<KeyValue> {
    let mut keys: Vec<&Keyframe> = keyframes
        .iter()
        .filter(|k| k.property == property && k.time.is_finite())
        .collect();
    // Stable, so equal times keep source order.
    keys.sort_by(|a, b| a.time.total_cmp(&b.time));

    let (first, last) = (keys.first()?, keys.last()?);
    if keys.len() == 1 {
        return Some(first.value.clone());
    }

    let idx = keys.partition_point(|k| k.time <= local);
    if idx == 0 {
        return Some(first.value.clone());
    }
    if idx >= keys.len() {
        return Some(last.value.clone());
    }

    let (before, after) = (keys[idx - 1], keys[idx]);
    let width = after.time - before.time;
    let progress = if width > 0.0 {
        (local - before.time) / width
    } else {
        0.0
    };
    let eased = after.easing.apply(progress);

    Some(match (&before.value, &after.value) {
        (KeyValue::Number(a), KeyValue::Number(b)) => KeyValue::Number(lerp(*a, *b, eased)),
        _ if eased < 0.5 => before.value.clone(),
        _ => after.value.clone(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
