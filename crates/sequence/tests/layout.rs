//! End-to-end layout passes over parsed documents.

use anyhow::Error;
use html::parse_html;
use sequence::{Breakpoint, PassSummary, Sequence};

mod common;
use common::{by_id, child_labels, init_logger, parent_id, tagged};

#[test]
fn sorts_by_order_descending_and_keeps_ties_stable() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<div id="list" sq-container>
            <p sq-id="a" sq-order="5"></p>
            <p sq-id="b"></p>
            <p sq-id="c" sq-order="5"></p>
            <p sq-id="d" sq-order="2"></p>
        </div>"#,
    )?;
    let mut engine = Sequence::new();
    engine.update(&mut dom)?;

    let list = by_id(&dom, "list")?;
    assert_eq!(child_labels(&dom, list), ["a", "c", "d", "b"]);
    Ok(())
}

#[test]
fn scoped_rule_places_element_at_active_breakpoint() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<div id="home"><span sq-id="x"></span></div>
           <div id="wide" sq-for-900="x,y"></div>"#,
    )?;
    let mut engine = Sequence::new();
    engine.configure(&mut dom, [600_u32, 900])?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("home"));

    assert!(engine.resolve(950));
    assert_eq!(engine.active_breakpoint(), Breakpoint::new(900));
    engine.update(&mut dom)?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("wide"));
    assert!(dom.has_attribute(by_id(&dom, "wide")?, "sq-container"));
    Ok(())
}

#[test]
fn unscoped_rule_applies_when_no_scoped_rule_matches() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<div id="home"><span sq-id="x"></span></div>
           <div id="any" sq-for="x,y"></div>"#,
    )?;
    let mut engine = Sequence::new();
    engine.configure(&mut dom, [600_u32, 900])?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("any"));

    assert!(engine.resolve(950));
    engine.update(&mut dom)?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("any"));
    Ok(())
}

#[test]
fn scoped_rule_beats_unscoped_rule() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<div id="fallback" sq-for="x"></div>
           <div id="wide" sq-for-900="x"></div>
           <span sq-id="x"></span>"#,
    )?;
    let mut engine = Sequence::new();
    engine.configure(&mut dom, [600_u32, 900])?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("fallback"));

    assert!(engine.resolve(1280));
    engine.update(&mut dom)?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("wide"));

    assert!(engine.resolve(700));
    engine.update(&mut dom)?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("fallback"));
    Ok(())
}

#[test]
fn first_matching_container_in_document_order_wins() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<div id="first" sq-for="x"></div>
           <div id="second" sq-for="x"></div>
           <span sq-id="x"></span>"#,
    )?;
    Sequence::new().update(&mut dom)?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("first"));
    assert!(!dom.has_attribute(by_id(&dom, "second")?, "sq-container"));
    Ok(())
}

#[test]
fn unmatched_elements_stay_in_place() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<div id="home"><span sq-id="lonely"></span></div>
           <div id="other" sq-for="someone-else"></div>"#,
    )?;
    let summary = Sequence::new().update(&mut dom)?;
    assert_eq!(summary.moved, 0);
    assert_eq!(parent_id(&dom, "lonely")?.as_deref(), Some("home"));
    Ok(())
}

#[test]
fn scoped_order_applies_only_at_its_breakpoint() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<nav id="menu" sq-for="home,about,contact">
           </nav>
           <a sq-id="home" sq-order="3"></a>
           <a sq-id="about" sq-order="2" sq-order-600="9"></a>
           <a sq-id="contact" sq-order="1" sq-order-600="bogus"></a>"#,
    )?;
    let mut engine = Sequence::new();
    engine.configure(&mut dom, [600_u32])?;
    let menu = by_id(&dom, "menu")?;
    assert_eq!(child_labels(&dom, menu), ["home", "about", "contact"]);

    assert!(engine.resolve(640));
    engine.update(&mut dom)?;
    assert_eq!(child_labels(&dom, menu), ["about", "home", "contact"]);

    assert!(engine.resolve(320));
    engine.update(&mut dom)?;
    assert_eq!(child_labels(&dom, menu), ["home", "about", "contact"]);
    Ok(())
}

#[test]
fn text_children_sort_as_zero() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<ul id="list" sq-container>before<li sq-order="-1">neg</li><li sq-order="1">pos</li></ul>"#,
    )?;
    Sequence::new().update(&mut dom)?;
    let list = by_id(&dom, "list")?;
    assert_eq!(
        dom.subtree_to_html(list),
        r#"<ul id="list" sq-container=""><li sq-order="1">pos</li>before<li sq-order="-1">neg</li></ul>"#
    );
    Ok(())
}

#[test]
fn update_is_idempotent() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<main id="main" sq-for="card-1,card-2,card-3" sq-for-900="card-3">
             <p id="intro">intro</p>
           </main>
           <aside id="side" sq-for-900="card-1,card-2">
             <div sq-id="card-2" sq-order="4"></div>
           </aside>
           <div sq-id="card-1" sq-order="1"><section id="inner" sq-for="card-3"></section></div>
           <div sq-id="card-3"></div>"#,
    )?;
    let mut engine = Sequence::new();
    engine.configure(&mut dom, [900_u32])?;
    for width in [1200, 400] {
        engine.resolve(width);
        engine.update(&mut dom)?;
        let first = dom.to_html();
        let summary = engine.update(&mut dom)?;
        assert_eq!(dom.to_html(), first, "second pass changed the tree at width {width}");
        assert_eq!(summary.moved, 0);
    }
    Ok(())
}

#[test]
fn blocked_move_is_retried_once_its_destination_leaves() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<div sq-id="p"><div sq-id="d" sq-for="p"></div></div>
           <div id="home" sq-for="d"></div>"#,
    )?;
    let mut engine = Sequence::new();
    let summary = engine.update(&mut dom)?;
    assert_eq!(summary.moved, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(parent_id(&dom, "d")?.as_deref(), Some("home"));
    let d = tagged(&dom, "d")?;
    assert_eq!(dom.parent(tagged(&dom, "p")?), Some(d));

    let first = dom.to_html();
    let summary = engine.update(&mut dom)?;
    assert_eq!(summary, PassSummary { containers: 2, ..PassSummary::default() });
    assert_eq!(dom.to_html(), first);
    Ok(())
}

#[test]
fn containers_can_be_tagged_themselves() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<div id="shell" sq-for="panel"></div>
           <div id="panel" sq-id="panel" sq-for="item"></div>
           <span sq-id="item"></span>"#,
    )?;
    Sequence::new().update(&mut dom)?;

    assert_eq!(parent_id(&dom, "panel")?.as_deref(), Some("shell"));
    assert_eq!(parent_id(&dom, "item")?.as_deref(), Some("panel"));
    let panel = tagged(&dom, "panel")?;
    assert!(dom.has_attribute(panel, "sq-container"));
    Ok(())
}

#[test]
fn clearing_breakpoints_resets_to_base_tier() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<div id="base" sq-for="x"></div>
           <div id="wide" sq-for-900="x"></div>
           <span sq-id="x"></span>"#,
    )?;
    let mut engine = Sequence::new();
    engine.configure(&mut dom, [900_u32])?;
    engine.resolve(1000);
    engine.update(&mut dom)?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("wide"));

    let summary = engine.clear_breakpoints(&mut dom)?;
    assert!(engine.breakpoints().is_empty());
    assert_eq!(engine.active_breakpoint(), Breakpoint::BASE);
    assert_eq!(summary.moved, 1);
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("base"));
    Ok(())
}

#[test]
fn base_tier_uses_zero_scoped_attributes() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<div id="narrow" sq-for-0="x"></div>
           <div id="plain" sq-for="x"></div>
           <span sq-id="x"></span>"#,
    )?;
    let mut engine = Sequence::new();
    engine.configure(&mut dom, [600_u32])?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("narrow"));

    engine.resolve(600);
    engine.update(&mut dom)?;
    assert_eq!(parent_id(&dom, "x")?.as_deref(), Some("plain"));
    Ok(())
}

#[test]
fn custom_prefix_renames_every_attribute() -> Result<(), Error> {
    init_logger();
    let mut dom = parse_html(
        r#"<ol id="list" data-seq-for="one,two"></ol>
           <li data-seq-id="one"></li>
           <li data-seq-id="two" data-seq-order="1"></li>
           <li sq-id="ignored"></li>"#,
    )?;
    let mut engine = Sequence::with_prefix("data-seq")?;
    let summary = engine.update(&mut dom)?;
    assert_eq!(
        summary,
        PassSummary {
            moved: 2,
            skipped: 0,
            containers: 1
        }
    );

    let list = by_id(&dom, "list")?;
    assert!(dom.has_attribute(list, "data-seq-container"));
    let order: Vec<Option<&str>> = dom
        .children(list)
        .into_iter()
        .map(|child| dom.get_attribute(child, "data-seq-id"))
        .collect();
    assert_eq!(order, [Some("two"), Some("one")]);
    Ok(())
}
