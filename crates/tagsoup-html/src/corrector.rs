//! Tag-balance correction.
//!
//! Real-world HTML is full of unclosed, misnested and stray tags. The
//! corrector rewrites the whole classified element sequence so that every
//! [`Element::Start`] has a matching [`Element::End`] in stack order. The
//! tree builder relies on that and closes the current node on any end tag.
//!
//! The pass needs the complete sequence: deciding whether a mismatched end
//! tag is extraneous or merely late depends on every tag of that name in the
//! document.

use log::debug;
use strum_macros::Display;

use crate::element::Element;

/// Tag whose start and end tags are removed from the output entirely.
const TRANSPARENT_TAG: &[u8] = b"center";

/// What the corrector did to repair the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RepairKind {
    /// An end tag that closes nothing currently open was dropped.
    #[strum(to_string = "dropped stray end tag")]
    StrayEndTag,

    /// An out-of-order end tag was dropped because the document has more
    /// closers than openers for its name.
    #[strum(to_string = "dropped extra end tag")]
    ExtraEndTag,

    /// An end tag was synthesized to close an element left open inside a
    /// late end tag's element.
    #[strum(to_string = "inserted implied end tag")]
    ImpliedEndTag,

    /// An end tag was synthesized at end of input.
    #[strum(to_string = "closed unterminated element")]
    UnclosedAtEof,

    /// A `center` start or end tag was removed.
    #[strum(to_string = "removed transparent tag")]
    TransparentTag,
}

/// One repair applied while correcting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    /// What was done.
    pub kind: RepairKind,
    /// Name of the tag involved.
    pub name: String,
    /// Index into the corrected sequence at which the repair applies.
    pub position: usize,
}

/// Rebalances a classified element sequence.
///
/// ```text
/// <div><p>a</p><span>b</div>    =>    <div><p>a</p><span>b</span></div>
/// ```
pub struct TagCorrector {
    /// Working copy of the input. Dropped end tags are removed from it and
    /// implied end tags are inserted into it, so balance scans see both.
    elements: Vec<Element>,

    /// Position of the element being processed in `elements`.
    index: usize,

    /// Names of the start tags currently open, innermost last.
    open_elements: Vec<Vec<u8>>,

    output: Vec<Element>,

    repairs: Vec<Repair>,
}

impl TagCorrector {
    /// Create a corrector over a classified element sequence.
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        let capacity = elements.len();
        Self {
            elements,
            index: 0,
            open_elements: Vec::with_capacity(64),
            output: Vec::with_capacity(capacity),
            repairs: Vec::new(),
        }
    }

    /// Run the correction and return the balanced sequence.
    #[must_use]
    pub fn run(self) -> Vec<Element> {
        self.run_with_repairs().0
    }

    /// Run the correction and return the balanced sequence together with
    /// every repair that was applied, in order.
    #[must_use]
    pub fn run_with_repairs(mut self) -> (Vec<Element>, Vec<Repair>) {
        while self.index < self.elements.len() {
            self.step();
        }
        self.close_remaining();
        (self.output, self.repairs)
    }

    fn step(&mut self) {
        let element = self.elements[self.index].clone();
        match element {
            Element::Start { name, attributes } => {
                if name == TRANSPARENT_TAG {
                    self.repair(RepairKind::TransparentTag, &name);
                } else {
                    self.open_elements.push(name.clone());
                    self.output.push(Element::Start { name, attributes });
                }
                self.index += 1;
            }
            Element::End { name } => {
                if name == TRANSPARENT_TAG {
                    self.repair(RepairKind::TransparentTag, &name);
                    self.index += 1;
                } else {
                    self.process_end_tag(name);
                }
            }
            other @ (Element::Content(_) | Element::Comment(_) | Element::Void { .. }) => {
                self.output.push(other);
                self.index += 1;
            }
        }
    }

    fn process_end_tag(&mut self, name: Vec<u8>) {
        let Some(current) = self.open_elements.last() else {
            self.repair(RepairKind::StrayEndTag, &name);
            self.index += 1;
            return;
        };

        if *current == name {
            let _ = self.open_elements.pop();
            self.output.push(Element::End { name });
            self.index += 1;
            return;
        }

        let Some(matched) = self.open_elements.iter().rposition(|open| *open == name) else {
            self.repair(RepairKind::StrayEndTag, &name);
            self.index += 1;
            return;
        };

        if self.balance(&name) < 0 {
            // More closers than openers for this name: this one is extra.
            let _ = self.elements.remove(self.index);
            self.repair(RepairKind::ExtraEndTag, &name);
            return;
        }

        let implied: Vec<Vec<u8>> = self.open_elements.drain(matched + 1..).rev().collect();
        self.open_elements.truncate(matched);
        for open in implied {
            self.repair(RepairKind::ImpliedEndTag, &open);
            let end = Element::End { name: open };
            self.elements.insert(self.index, end.clone());
            self.index += 1;
            self.output.push(end);
        }
        self.output.push(Element::End { name });
        self.index += 1;
    }

    /// Start tags minus end tags named `name` across the whole working
    /// sequence.
    fn balance(&self, name: &[u8]) -> isize {
        self.elements
            .iter()
            .map(|element| match element {
                Element::Start { name: n, .. } if n.as_slice() == name => 1,
                Element::End { name: n } if n.as_slice() == name => -1,
                _ => 0,
            })
            .sum()
    }

    fn close_remaining(&mut self) {
        while let Some(open) = self.open_elements.pop() {
            self.repair(RepairKind::UnclosedAtEof, &open);
            self.output.push(Element::End { name: open });
        }
    }

    fn repair(&mut self, kind: RepairKind, name: &[u8]) {
        let name = String::from_utf8_lossy(name).into_owned();
        let position = self.output.len();
        debug!("{kind}: {name} (at {position})");
        self.repairs.push(Repair {
            kind,
            name,
            position,
        });
    }
}

/// Balance a classified element sequence, discarding the repair log.
#[must_use]
pub fn correct(elements: Vec<Element>) -> Vec<Element> {
    TagCorrector::new(elements).run()
}
