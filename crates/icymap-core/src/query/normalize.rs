use crate::query::Filter;

///
/// Normalize a filter into a canonical, logically equivalent form.
///
/// - nested `And`/`Or` of the same kind are flattened
/// - neutral elements are dropped (`always` inside `And`, `never` inside `Or`)
/// - absorbing elements short-circuit (`never` in `And`, `always` in `Or`)
/// - single-child groups collapse to the child
///
/// Child order is preserved; backends may rely on it.
///

pub(crate) fn normalize<R>(filter: &Filter<R>) -> Filter<R> {
    match filter {
        Filter::Field(_) | Filter::Backend(_) => filter.clone(),
        Filter::And(children) => normalize_and(children),
        Filter::Or(children) => normalize_or(children),
    }
}

fn normalize_and<R>(children: &[Filter<R>]) -> Filter<R> {
    let mut out = Vec::with_capacity(children.len());

    for child in children {
        match normalize(child) {
            n if n.is_always() => {}
            n if n.is_never() => return Filter::never(),
            Filter::And(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    collapse(out, Filter::And)
}

fn normalize_or<R>(children: &[Filter<R>]) -> Filter<R> {
    let mut out = Vec::with_capacity(children.len());

    for child in children {
        match normalize(child) {
            n if n.is_never() => {}
            n if n.is_always() => return Filter::always(),
            Filter::Or(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    collapse(out, Filter::Or)
}

fn collapse<R>(mut children: Vec<Filter<R>>, group: fn(Vec<Filter<R>>) -> Filter<R>) -> Filter<R> {
    if children.len() == 1
        && let Some(only) = children.pop()
    {
        return only;
    }

    group(children)
}
