use crate::dom::DomNode;
use crate::error::Error;

/// Absolute XPath for `element`, e.g. `/html/body/div[2]/p`.
///
/// Each step carries a 1-based `[n]` position among same-tag siblings; the
/// qualifier is left off when the element is the only one with its tag.
pub fn element_xpath<N: DomNode>(element: &N) -> Result<String, Error> {
    let mut steps = Vec::new();
    let mut current = element.clone();
    while !current.is_document() {
        let tag = current.tag_name().ok_or(Error::NotInTree)?;
        let parent = current.parent().ok_or(Error::NotInTree)?;
        steps.push(step_for(&parent, &current, &tag));
        current = parent;
    }
    if steps.is_empty() {
        return Err(Error::NotInTree);
    }
    steps.reverse();
    Ok(format!("/{}", steps.join("/")))
}

fn step_for<N: DomNode>(parent: &N, node: &N, tag: &str) -> String {
    let mut same_tag = 0usize;
    let mut position = 0usize;
    for sibling in parent.children() {
        if sibling.tag_name().as_deref() != Some(tag) {
            continue;
        }
        same_tag += 1;
        if sibling == *node {
            position = same_tag;
        }
    }
    if same_tag > 1 {
        format!("{tag}[{position}]")
    } else {
        tag.to_string()
    }
}

/// Understands only the absolute `/tag[n]` paths [`element_xpath`] produces.
pub fn resolve_xpath<N: DomNode>(document: &N, path: &str) -> Option<N> {
    let rest = path.strip_prefix('/')?;
    let mut current = document.clone();
    for step in rest.split('/') {
        let (tag, position) = parse_step(step)?;
        current = current
            .children()
            .filter(|child| child.tag_name().as_deref() == Some(tag))
            .nth(position - 1)?;
    }
    Some(current)
}

fn parse_step(step: &str) -> Option<(&str, usize)> {
    let (tag, position) = match step.split_once('[') {
        Some((tag, index)) => (tag, index.strip_suffix(']')?.parse::<usize>().ok()?),
        None => (step, 1),
    };
    if tag.is_empty() || position == 0 {
        return None;
    }
    Some((tag, position))
}
