use crate::command::Command;
use crate::error::DiscoveryError;
use crate::scanner::DiscoveredCommand;
use std::any::Any;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet, VecDeque};
use xcore_domain::command::{CommandDescriptor, CommandKey, CommandKind, ParentRef};
use xcore_logger::ModuleLogger;

/// A registered command and its place in the module's command forest.
#[derive(Debug)]
pub struct CommandNode {
    class: Cow<'static, str>,
    descriptor: CommandDescriptor,
    instance: Box<dyn Command>,
    parent: Option<CommandKey>,
    children: Vec<CommandKey>,
}

impl CommandNode {
    #[must_use]
    pub const fn key(&self) -> CommandKey {
        self.descriptor.key
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    #[must_use]
    pub const fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        self.descriptor.kind
    }

    #[must_use]
    pub fn canonical_alias(&self) -> &str {
        self.descriptor.canonical_alias()
    }

    #[must_use]
    pub fn instance(&self) -> &dyn Command {
        &*self.instance
    }

    /// Effective parent after resolution; `None` for top-level commands.
    #[must_use]
    pub const fn parent(&self) -> Option<CommandKey> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[CommandKey] {
        &self.children
    }
}

/// Per-module command forest.
///
/// Every command is either top-level or the child of exactly one other command of the
/// same module, and the parent relation is acyclic. Aliases are unique, ignoring case,
/// among the top-level commands and among the children of each parent.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    nodes: Vec<CommandNode>,
    index: HashMap<CommandKey, usize>,
    rejected: Vec<DiscoveryError>,
}

impl CommandRegistry {
    /// Instantiates the discovered commands and links them into a forest.
    ///
    /// Unresolvable parents and links that would close a cycle degrade to top-level.
    /// A command whose alias collides with an earlier sibling is rejected and its
    /// children move to the top level.
    #[must_use]
    pub fn build(logger: &ModuleLogger, discovered: Vec<DiscoveredCommand>) -> Self {
        let mut rejected = Vec::new();
        let mut seen = HashSet::new();
        let discovered: Vec<DiscoveredCommand> = discovered
            .into_iter()
            .filter(|command| {
                let fresh = seen.insert(command.descriptor.key);
                if !fresh {
                    let err = DiscoveryError::Duplicate { class: command.class.clone(), context: None };
                    logger.error("Skipping command", &err);
                    rejected.push(err);
                }
                fresh
            })
            .collect();

        let keys: Vec<CommandKey> = discovered.iter().map(|c| c.descriptor.key).collect();
        let index: HashMap<CommandKey, usize> =
            keys.iter().enumerate().map(|(position, key)| (*key, position)).collect();

        let parents = link_parents(logger, &discovered, &index);
        let (accepted, parents, collisions) = enforce_unique_aliases(logger, &discovered, parents);
        rejected.extend(collisions);

        let mut registry = Self { rejected, ..Self::default() };
        for (position, command) in discovered.into_iter().enumerate() {
            if !accepted[position] {
                continue;
            }
            registry.index.insert(command.descriptor.key, registry.nodes.len());
            registry.nodes.push(CommandNode {
                class: command.class,
                instance: (command.factory)(),
                parent: parents[position].map(|p| keys[p]),
                descriptor: command.descriptor,
                children: Vec::new(),
            });
        }

        for position in 0..registry.nodes.len() {
            if let Some(parent) = registry.nodes[position].parent
                && let Some(&parent_position) = registry.index.get(&parent)
            {
                let key = registry.nodes[position].key();
                registry.nodes[parent_position].children.push(key);
            }
        }

        logger.debug(&format!(
            "Registered {} commands ({} top-level)",
            registry.nodes.len(),
            registry.top_level().count()
        ));
        registry
    }

    /// Top-level commands in insertion order.
    pub fn top_level(&self) -> impl Iterator<Item = &CommandNode> {
        self.nodes.iter().filter(|node| node.parent.is_none())
    }

    /// Children of `key` in insertion order; empty for unknown keys.
    pub fn children(&self, key: CommandKey) -> impl Iterator<Item = &CommandNode> {
        self.get(key)
            .map(CommandNode::children)
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.get(*child))
    }

    #[must_use]
    pub fn get(&self, key: CommandKey) -> Option<&CommandNode> {
        self.index.get(&key).map(|&position| &self.nodes[position])
    }

    /// The live instance of command type `T`.
    #[must_use]
    pub fn get_instance<T: Command>(&self) -> Option<&T> {
        let node = self.get(CommandKey::of::<T>())?;
        let instance: &dyn Any = &*node.instance;
        instance.downcast_ref::<T>()
    }

    /// Depth-first pre-order traversal of the whole forest.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        let mut stack: Vec<&CommandNode> = self.top_level().collect();
        stack.reverse();
        Walk { registry: self, stack }
    }

    /// Follows an alias path from the top level, matching aliases case-insensitively.
    #[must_use]
    pub fn resolve(&self, path: &[&str]) -> Option<&CommandNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.top_level().find(|node| node.descriptor.matches(first))?;
        for alias in rest {
            node = self.children(node.key()).find(|child| child.descriptor.matches(alias))?;
        }
        Some(node)
    }

    /// Canonical aliases from the top-level ancestor down to `key`.
    #[must_use]
    pub fn path(&self, key: CommandKey) -> Option<Vec<&str>> {
        let mut node = self.get(key)?;
        let mut path = vec![node.canonical_alias()];
        while let Some(parent) = node.parent.and_then(|p| self.get(p)) {
            path.push(parent.canonical_alias());
            node = parent;
        }
        path.reverse();
        Some(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Commands rejected while building the forest.
    #[must_use]
    pub fn rejected(&self) -> &[DiscoveryError] {
        &self.rejected
    }
}

/// Iterator returned by [`CommandRegistry::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    registry: &'a CommandRegistry,
    stack: Vec<&'a CommandNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a CommandNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let registry = self.registry;
        self.stack.extend(node.children.iter().rev().filter_map(|child| registry.get(*child)));
        Some(node)
    }
}

/// Resolves declared parents in insertion order. A link is kept only when the parent
/// is a command of this module and is not already a descendant of the child.
fn link_parents(
    logger: &ModuleLogger,
    discovered: &[DiscoveredCommand],
    index: &HashMap<CommandKey, usize>,
) -> Vec<Option<usize>> {
    let mut parents: Vec<Option<usize>> = vec![None; discovered.len()];

    for (position, command) in discovered.iter().enumerate() {
        let ParentRef::ParentIs(parent_key) = command.descriptor.parent else {
            continue;
        };
        let Some(&parent) = index.get(&parent_key) else {
            logger.debug(&format!(
                "Parent {parent_key:?} of '{}' is not registered in this module, registering at top level",
                command.class
            ));
            continue;
        };

        if closes_cycle(&parents, position, parent) {
            logger.warn(&format!(
                "Parent {parent_key:?} of '{}' would create a command cycle, registering at top level",
                command.class
            ));
            continue;
        }
        parents[position] = Some(parent);
    }

    parents
}

/// Whether linking `child` under `parent` makes `child` its own ancestor.
fn closes_cycle(parents: &[Option<usize>], child: usize, parent: usize) -> bool {
    let mut cursor = Some(parent);
    let mut steps = 0;
    while let Some(current) = cursor {
        if current == child || steps > parents.len() {
            return true;
        }
        cursor = parents[current];
        steps += 1;
    }
    false
}

/// Checks alias uniqueness breadth-first from the top level. Returns which commands are
/// accepted and the effective parents after orphaning children of rejected commands.
fn enforce_unique_aliases(
    logger: &ModuleLogger,
    discovered: &[DiscoveredCommand],
    mut parents: Vec<Option<usize>>,
) -> (Vec<bool>, Vec<Option<usize>>, Vec<DiscoveryError>) {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); discovered.len()];
    for (position, parent) in parents.iter().enumerate() {
        if let Some(parent) = parent {
            children[*parent].push(position);
        }
    }

    let mut accepted = vec![false; discovered.len()];
    let mut rejected = Vec::new();
    // Sibling group (parent position, or None for top level) -> lowercase alias -> owner.
    let mut taken: HashMap<Option<usize>, HashMap<String, usize>> = HashMap::new();
    let mut queue: VecDeque<usize> =
        (0..discovered.len()).filter(|&position| parents[position].is_none()).collect();

    while let Some(position) = queue.pop_front() {
        let group = taken.entry(parents[position]).or_default();
        let descriptor = &discovered[position].descriptor;
        let collision = descriptor.aliases.iter().find_map(|alias| {
            group.get(&alias.to_lowercase()).map(|&owner| (alias.clone(), owner))
        });

        if let Some((alias, owner)) = collision {
            let err = DiscoveryError::AliasCollision {
                class: discovered[position].class.clone(),
                alias,
                existing: discovered[owner].class.clone(),
                context: None,
            };
            logger.error("Skipping command", &err);
            rejected.push(err);
            for &child in &children[position] {
                parents[child] = None;
                queue.push_back(child);
            }
            continue;
        }

        for alias in &descriptor.aliases {
            group.entry(alias.to_lowercase()).or_insert(position);
        }
        accepted[position] = true;
        queue.extend(children[position].iter().copied());
    }

    (accepted, parents, rejected)
}
