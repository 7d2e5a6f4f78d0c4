//! The jsDOM suite, run against a small in-memory document tree.
//!
//! ```text
//! cargo run --example dom_suite -- --laps 5
//! cargo run --example dom_suite -- table --format json
//! ```

use lapbench::RegistryError;
use lapbench::prelude::*;
use std::hint::black_box;

const ROWS: usize = 50;
const COLS: usize = 5;
const FORM_ROWS: usize = 10;
const FORM_COLS: usize = 6;

const COLORS: [&str; 14] = [
    "#000", "#007", "#00f", "#070", "#077", "#07f", "#0f0", "#0f7", "#0ff", "#700", "#707",
    "#70f", "#770", "#777",
];
const CSS_PROPS: [&str; 11] = [
    "width", "margin", "padding", "border-style", "border-style", "width", "margin-left",
    "font-family", "font-family", "font-family", "font-style",
];
const CSS_VALUES: [&str; 11] = [
    "100px", "5pt", "1em", "solid", "none", "10%", "5px", "serif", "sans-serif", "monospace",
    "italic",
];
const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit, sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in \
reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint \
occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

const BODY: NodeId = NodeId(0);

#[derive(Debug, Clone, Default)]
struct Element {
    tag: &'static str,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(&'static str, String)>,
    style: Vec<(&'static str, &'static str)>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena of elements rooted at `<body>`. Detached nodes stay in the arena
/// until the next wipe.
#[derive(Debug)]
struct Document {
    nodes: Vec<Element>,
}

impl Document {
    fn new() -> Self {
        Self {
            nodes: vec![Element {
                tag: "body",
                ..Default::default()
            }],
        }
    }

    fn node(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0]
    }

    fn create(&mut self, tag: &'static str) -> NodeId {
        self.nodes.push(Element {
            tag,
            ..Default::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    fn create_with_id(&mut self, tag: &'static str, id: impl Into<String>) -> NodeId {
        let node = self.create(tag);
        self.node_mut(node).id = Some(id.into());
        node
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != node);
        }
    }

    fn deep_clone(&mut self, node: NodeId) -> NodeId {
        let mut copy = self.node(node).clone();
        let children = std::mem::take(&mut copy.children);
        copy.parent = None;
        self.nodes.push(copy);
        let cloned = NodeId(self.nodes.len() - 1);
        for child in children {
            let child_copy = self.deep_clone(child);
            self.append(cloned, child_copy);
        }
        cloned
    }

    /// Nodes attached below `root` in document order, `root` excluded
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(root).children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.node(node).children.iter().rev().copied());
        }
        out
    }

    fn select(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&n| self.node(n).tag == tag)
            .collect()
    }

    fn by_id(&self, id: &str) -> Result<NodeId, BoxError> {
        self.descendants(BODY)
            .into_iter()
            .find(|&n| self.node(n).id.as_deref() == Some(id))
            .ok_or_else(|| format!("no element with id '{}'", id).into())
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.node_mut(node).classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.node_mut(node).classes.retain(|c| c != class);
    }

    fn set_attr(&mut self, node: NodeId, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        let attrs = &mut self.node_mut(node).attrs;
        match attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => attrs.push((name, value)),
        }
    }

    fn set_style(&mut self, node: NodeId, prop: &'static str, value: &'static str) {
        let style = &mut self.node_mut(node).style;
        match style.iter_mut().find(|(p, _)| *p == prop) {
            Some((_, v)) => *v = value,
            None => style.push((prop, value)),
        }
    }

    /// Empty the body
    fn wipe(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].children.clear();
    }
}

fn cell_id(i: usize, j: usize) -> String {
    format!("el{}_{}", i, j)
}

/// `ROWS` x `COLS` table of "Test" cells appended to the body
fn text_table(doc: &mut Document, with_ids: bool) -> NodeId {
    let table = doc.create_with_id("table", "myTable");
    for i in 0..ROWS {
        let row = doc.create("tr");
        for j in 0..COLS {
            let cell = if with_ids {
                doc.create_with_id("td", cell_id(i, j))
            } else {
                doc.create("td")
            };
            doc.node_mut(cell).text = "Test".to_string();
            doc.append(row, cell);
        }
        doc.append(table, row);
    }
    doc.append(BODY, table);
    table
}

/// Label plus input, both appended to `parent`
fn append_input(
    doc: &mut Document,
    parent: NodeId,
    name: &str,
    kind: &'static str,
    value: &str,
    suffix: Option<&str>,
) {
    let id = match suffix {
        Some(suffix) => format!("{}_{}", name, suffix),
        None => name.to_string(),
    };

    let label = doc.create("label");
    doc.set_attr(label, "for", id.clone());
    doc.node_mut(label).text = id.clone();

    let input = doc.create_with_id("input", id);
    doc.set_attr(input, "type", kind);
    doc.set_attr(input, "value", value);
    doc.set_attr(input, "name", name);

    doc.append(parent, label);
    doc.append(parent, input);
}

fn build_suite() -> Result<Suite<Document>, RegistryError> {
    let mut suite = Suite::new("jsDOM", Document::new())
        .with_version("1-pre (unreleased)")
        .with_teardown(|doc: &mut Document| {
            doc.wipe();
            Ok(())
        })
        .with_baselines(BaselineReference::jsdom_browsers());

    suite.register(
        "tableCreation",
        "This test measures the time it takes to create a large but simple HTML table \
         containing only unformated text by creating individual cells one at a time.",
        |_| Ok(()),
        |doc: &mut Document, ()| {
            let table = doc.create_with_id("table", "myTable");
            doc.append(BODY, table);
            for _ in 0..ROWS {
                let row = doc.create("tr");
                for _ in 0..COLS {
                    let cell = doc.create("td");
                    doc.node_mut(cell).text = "Test".to_string();
                    doc.append(row, cell);
                }
                doc.append(table, row);
            }
            Ok(())
        },
    )?;

    suite.register(
        "tableCloning",
        "This test measures the time it takes to create a large but simple HTML table \
         containing only unformated text by cloning preexisting table rows.",
        |doc: &mut Document| {
            let table = doc.create_with_id("table", "myTable");
            doc.append(BODY, table);
            let row = doc.create("tr");
            for _ in 0..COLS {
                let cell = doc.create("td");
                doc.node_mut(cell).text = "Test".to_string();
                doc.append(row, cell);
            }
            doc.append(table, row);
            Ok((table, row))
        },
        |doc: &mut Document, (table, row): (NodeId, NodeId)| {
            for _ in 0..ROWS {
                let copy = doc.deep_clone(row);
                doc.append(table, copy);
            }
            Ok(())
        },
    )?;

    suite.register(
        "tableRemoval",
        "This test measures the time it takes to remove a table, one table cell at a time.",
        |doc: &mut Document| {
            text_table(doc, true);
            Ok(())
        },
        |doc: &mut Document, ()| {
            for i in 0..ROWS {
                for j in 0..COLS {
                    let cell = doc.by_id(&cell_id(i, j))?;
                    doc.detach(cell);
                }
            }
            Ok(())
        },
    )?;

    suite.register(
        "elementSearch",
        "This test measures the time it takes to find table cells using class, \
         position and descendant queries.",
        |doc: &mut Document| {
            let classes = ["foo", "bar", "baz"];
            let table = doc.create_with_id("table", "myTable");
            for i in 0..ROWS {
                let row = doc.create("tr");
                // Every fourth row has no class
                if let Some(class) = classes.get(i % 4) {
                    doc.add_class(row, class);
                }
                for j in 0..COLS {
                    let cell = doc.create_with_id("td", cell_id(i, j));
                    doc.node_mut(cell).text = "Test".to_string();
                    doc.add_class(cell, &format!("foo_{}", i));
                    doc.append(row, cell);
                }
                doc.append(table, row);
            }
            doc.append(BODY, table);
            Ok(())
        },
        |doc: &mut Document, ()| {
            for _ in 0..ROWS {
                let rows: Vec<NodeId> = doc
                    .select(BODY, "table")
                    .into_iter()
                    .flat_map(|table| doc.select(table, "tr"))
                    .collect();

                // table tr.bar td:last
                let last_bar_cell = rows
                    .iter()
                    .filter(|&&row| doc.has_class(row, "bar"))
                    .flat_map(|&row| doc.select(row, "td"))
                    .last();
                black_box(last_bar_cell);

                // table tr:odd .foo_4
                let odd_matches = rows
                    .iter()
                    .skip(1)
                    .step_by(2)
                    .flat_map(|&row| doc.descendants(row))
                    .filter(|&n| doc.has_class(n, "foo_4"))
                    .count();
                black_box(odd_matches);
            }
            Ok(())
        },
    )?;

    suite.register(
        "simpleStyling",
        "This test measures the time it takes to perform simple style changes on individual \
         elements in the DOM. A large number of elements get their color changed (using the \
         color and background-color css attributes).",
        |doc: &mut Document| {
            text_table(doc, true);
            Ok(())
        },
        |doc: &mut Document, ()| {
            for i in 0..ROWS {
                for j in 0..COLS {
                    let cell = doc.by_id(&cell_id(i, j))?;
                    doc.set_style(cell, "color", COLORS[(i + j) % 13]);
                    let cell = doc.by_id(&cell_id(i, j))?;
                    doc.set_style(cell, "background-color", COLORS[(i + j + 1) % 13]);
                }
            }
            Ok(())
        },
    )?;

    suite.register(
        "complexStyling",
        "This test measures the time it takes to perform more complex style changes on \
         individual elements in the DOM. A large number of elements get their width, margin, \
         padding and various other attributes changed.",
        |doc: &mut Document| {
            text_table(doc, true);
            Ok(())
        },
        |doc: &mut Document, ()| {
            for i in 0..ROWS {
                for j in 0..COLS {
                    let first = (i + j) % CSS_PROPS.len();
                    let second = (i + j + 1) % CSS_PROPS.len();
                    let cell = doc.by_id(&cell_id(i, j))?;
                    doc.set_style(cell, CSS_PROPS[first], CSS_VALUES[first]);
                    let cell = doc.by_id(&cell_id(i, j))?;
                    doc.set_style(cell, CSS_PROPS[second], CSS_VALUES[second]);
                }
            }
            Ok(())
        },
    )?;

    suite.register(
        "formCreation",
        "This test measures the time it takes to create form elements such as input boxes \
         dropdown fields and text areas. Most form items have an associated label as well.",
        |doc: &mut Document| {
            let form = doc.create("form");
            doc.set_attr(form, "name", "tjoho");
            doc.set_attr(form, "method", "post");
            let table = doc.create_with_id("table", "myTable");
            for i in 0..FORM_ROWS {
                let row = doc.create("tr");
                for j in 0..FORM_COLS {
                    let cell = doc.create_with_id("td", cell_id(i, j));
                    doc.append(row, cell);
                }
                doc.append(table, row);
            }
            doc.append(form, table);
            doc.append(BODY, form);
            Ok(())
        },
        |doc: &mut Document, ()| {
            for i in 0..FORM_ROWS {
                let cell = doc.by_id(&cell_id(i, 0))?;
                append_input(doc, cell, &format!("form{}_0", i), "text", "", None);

                let select = doc.create("select");
                for j in 0..20 {
                    let option = doc.create("option");
                    doc.set_attr(option, "value", j.to_string());
                    doc.node_mut(option).text = format!("Option number {}", j);
                    doc.append(select, option);
                }
                let cell = doc.by_id(&cell_id(i, 1))?;
                doc.append(cell, select);

                let cell = doc.by_id(&cell_id(i, 2))?;
                let name = format!("form{}_2", i);
                append_input(doc, cell, &name, "text", "Bla bla bla bla bla bla bla", None);

                for (col, kind) in [(3, "checkbox"), (4, "radio")] {
                    let cell = doc.by_id(&cell_id(i, col))?;
                    let name = format!("form{}_{}", i, col);
                    for value in ["1", "2", "3", "4"] {
                        append_input(doc, cell, &name, kind, value, Some(value));
                    }
                }

                let textarea = doc.create("textarea");
                doc.node_mut(textarea).text = LOREM.to_string();
                let cell = doc.by_id(&cell_id(i, 5))?;
                doc.append(cell, textarea);
            }
            Ok(())
        },
    )?;

    suite.register(
        "classChange",
        "This test measures the time it takes to add and remove css classes from dom nodes. \
         A large number of elements get their colors and sizes changed by the adding and \
         removing of css classes.",
        |doc: &mut Document| {
            text_table(doc, true);
            Ok((doc.select(BODY, "tr"), doc.select(BODY, "td")))
        },
        |doc: &mut Document, (rows, cells): (Vec<NodeId>, Vec<NodeId>)| {
            for group in [&rows, &cells] {
                for class in ["style1", "style2", "style3"] {
                    for &node in group {
                        doc.add_class(node, class);
                    }
                }
                for class in ["style3", "style2", "style1"] {
                    for &node in group {
                        doc.remove_class(node, class);
                    }
                }
            }
            Ok(())
        },
    )?;

    Ok(suite)
}

fn main() -> anyhow::Result<()> {
    lapbench::run(build_suite()?)
}
