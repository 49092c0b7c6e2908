use crate::data::dataset::{Attribute, CategoryCode};
use crate::data::encoder::LabelEncoder;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter, Write};

/// Decision tree node
///
/// A decision node owns its children, keyed by the attribute codes observed
/// while building the tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node<T: CategoryCode> {
    Leaf {
        result: T,
    },
    Decision {
        attribute: Attribute,
        children: BTreeMap<T, Node<T>>,
    },
}

impl<T: CategoryCode> Node<T> {
    pub fn leaf(result: T) -> Self {
        Node::Leaf { result }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The predicted class of a leaf; `None` for decision nodes.
    pub fn result(&self) -> Option<T> {
        match self {
            Node::Leaf { result } => Some(*result),
            Node::Decision { .. } => None,
        }
    }

    pub fn attribute(&self) -> Option<&Attribute> {
        match self {
            Node::Leaf { .. } => None,
            Node::Decision { attribute, .. } => Some(attribute),
        }
    }

    pub fn children(&self) -> Option<&BTreeMap<T, Node<T>>> {
        match self {
            Node::Leaf { .. } => None,
            Node::Decision { children, .. } => Some(children),
        }
    }

    /// Number of decision levels on the longest root to leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Decision { children, .. } => {
                1 + children.values().map(Node::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Decision { children, .. } => children.values().map(Node::leaf_count).sum(),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Decision { children, .. } => {
                1 + children.values().map(Node::node_count).sum::<usize>()
            }
        }
    }

    /// Renders the tree with attribute values and classes decoded to the
    /// strings they were encoded from. Codes the encoder doesn't know are
    /// printed as numbers.
    pub fn render_with(&self, encoder: &LabelEncoder, class_index: usize) -> String {
        let decode = |column: usize, code: T| {
            encoder
                .decode(column, code)
                .map(str::to_string)
                .unwrap_or_else(|_| code.to_string())
        };
        let mut out = String::new();
        // writing into a String never fails
        let _ = self.render(&mut out, 0, &decode, class_index);
        out
    }

    fn render<W: Write>(
        &self,
        out: &mut W,
        indent: usize,
        label: &dyn Fn(usize, T) -> String,
        class_index: usize,
    ) -> fmt::Result {
        match self {
            Node::Leaf { result } => writeln!(out, "=> {}", label(class_index, *result)),
            Node::Decision {
                attribute,
                children,
            } => {
                writeln!(out, "[{}]", attribute)?;
                for (value, child) in children {
                    write!(
                        out,
                        "{:width$}{} = {} ",
                        "",
                        attribute,
                        label(attribute.column, *value),
                        width = indent + 2
                    )?;
                    child.render(out, indent + 2, label, class_index)?;
                }
                Ok(())
            }
        }
    }
}

impl<T: CategoryCode> Display for Node<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.render(f, 0, &|_: usize, code: T| code.to_string(), usize::MAX)
    }
}
