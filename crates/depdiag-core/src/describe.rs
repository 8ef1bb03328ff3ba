//! Building diagrams from domain objects.

use depdiag_error::Result;

use crate::diagram::DependencyDiagram;

/// Something that can draw itself into a [`DependencyDiagram`].
///
/// Implementors add their own entity and relationships, then recurse into
/// whatever they depend on. Because `link` deduplicates, shared dependencies
/// reached along several paths are drawn once.
pub trait Diagrammable {
    fn describe(&self, diagram: &mut DependencyDiagram) -> Result<()>;

    /// Describe into a fresh diagram.
    fn to_diagram(&self) -> Result<DependencyDiagram> {
        let mut diagram = DependencyDiagram::new();
        self.describe(&mut diagram)?;
        Ok(diagram)
    }
}

impl<T: Diagrammable> Diagrammable for [T] {
    fn describe(&self, diagram: &mut DependencyDiagram) -> Result<()> {
        for item in self {
            item.describe(diagram)?;
        }
        Ok(())
    }
}

impl<T: Diagrammable + ?Sized> Diagrammable for &T {
    fn describe(&self, diagram: &mut DependencyDiagram) -> Result<()> {
        (**self).describe(diagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::LinkKind;

    struct Stage {
        name: &'static str,
        upstream: Vec<Stage>,
    }

    impl Diagrammable for Stage {
        fn describe(&self, diagram: &mut DependencyDiagram) -> Result<()> {
            diagram.get_or_create(self.name)?;
            for parent in &self.upstream {
                diagram.link(self.name, parent.name, "decor", LinkKind::DependencyDashed)?;
                parent.describe(diagram)?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_describe_recurses() {
        let source = || Stage {
            name: "Source",
            upstream: Vec::new(),
        };
        let stage = Stage {
            name: "Concat",
            upstream: vec![
                Stage {
                    name: "Map",
                    upstream: vec![source()],
                },
                Stage {
                    name: "Filter",
                    upstream: vec![source()],
                },
            ],
        };

        let diagram = stage.to_diagram().unwrap();
        assert_eq!(diagram.entity_count(), 4);
        assert_eq!(diagram.relation_count(), 4);
        let names: Vec<_> = diagram.entities().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Concat", "Map", "Source", "Filter"]);
    }

    #[test]
    fn test_slice_describes_each() {
        let stages = [
            Stage {
                name: "A",
                upstream: Vec::new(),
            },
            Stage {
                name: "B",
                upstream: Vec::new(),
            },
        ];
        let diagram = stages[..].to_diagram().unwrap();
        assert_eq!(diagram.entity_count(), 2);
        assert_eq!(diagram.relation_count(), 0);
    }
}
