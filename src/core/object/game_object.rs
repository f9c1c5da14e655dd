//=========================================================================
// Game Object
//=========================================================================
//
// Named entity owning a Transform and a type-keyed multi-map of
// components.
//
// Architecture:
//   GameObject
//     ├─ transform: Transform
//     └─ components: BTreeMap<TypeId, Vec<AttachedComponent>>
//
// The BTreeMap gives a cross-type iteration order that is stable for
// the lifetime of the process, which keeps start()/tick() deterministic.
// Each attached component records the id of its owner at attach time.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::{type_name, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use super::{Component, Transform};

//=== ObjectId ============================================================

/// Process-unique identifier of a [`GameObject`].
///
/// Used as the non-owning back-reference from components and render
/// batches to the object they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== AttachedComponent ===================================================

/// A component together with the id of the object it was attached to.
struct AttachedComponent {
    owner: ObjectId,
    component: Box<dyn Component>,
}

impl AttachedComponent {
    fn downcast_ref<C: Component>(&self) -> Option<&C> {
        let concrete = self.component.as_any().downcast_ref::<C>();
        debug_assert!(
            concrete.is_some(),
            "component stored under {} reports a different concrete type",
            type_name::<C>()
        );
        concrete
    }

    fn downcast_mut<C: Component>(&mut self) -> Option<&mut C> {
        let concrete = self.component.as_any_mut().downcast_mut::<C>();
        debug_assert!(
            concrete.is_some(),
            "component stored under {} reports a different concrete type",
            type_name::<C>()
        );
        concrete
    }
}

//=== GameObject ==========================================================

/// Scene entity: a name, a [`Transform`] and any number of components.
///
/// Several components of the same concrete type may be attached at once.
/// Lookups never fail: a missing type yields `None` or an empty list.
pub struct GameObject {
    id: ObjectId,
    name: String,
    pub transform: Transform,
    components: BTreeMap<TypeId, Vec<AttachedComponent>>,
}

impl GameObject {
    //--- Construction -----------------------------------------------------

    pub fn new(name: impl Into<String>) -> Self {
        Self::with_transform(name, Transform::default())
    }

    pub fn with_transform(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            transform,
            components: BTreeMap::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total number of attached components across all types.
    pub fn component_count(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }

    //--- Attachment -------------------------------------------------------

    /// Attaches a component and records this object as its owner.
    ///
    /// Returns `self` so several components can be chained.
    pub fn add_component<C: Component>(&mut self, component: C) -> &mut Self {
        self.attach(TypeId::of::<C>(), Box::new(component));
        self
    }

    /// Attaches a batch of already boxed components.
    pub fn add_components<I>(&mut self, components: I) -> &mut Self
    where
        I: IntoIterator<Item = Box<dyn Component>>,
    {
        for component in components {
            let key = component.as_any().type_id();
            self.attach(key, component);
        }
        self
    }

    fn attach(&mut self, key: TypeId, component: Box<dyn Component>) {
        self.components
            .entry(key)
            .or_default()
            .push(AttachedComponent { owner: self.id, component });
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the first component of type `C`, if any.
    pub fn get_component<C: Component>(&self) -> Option<&C> {
        self.components
            .get(&TypeId::of::<C>())?
            .first()
            .and_then(AttachedComponent::downcast_ref::<C>)
    }

    pub fn get_component_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components
            .get_mut(&TypeId::of::<C>())?
            .first_mut()
            .and_then(AttachedComponent::downcast_mut::<C>)
    }

    /// Returns every component of type `C` (empty if none are attached).
    pub fn get_components<C: Component>(&self) -> Vec<&C> {
        self.components
            .get(&TypeId::of::<C>())
            .map(|set| set.iter().filter_map(AttachedComponent::downcast_ref::<C>).collect())
            .unwrap_or_default()
    }

    /// Returns the owner recorded for the first component of type `C`.
    pub fn component_owner<C: Component>(&self) -> Option<ObjectId> {
        self.components
            .get(&TypeId::of::<C>())?
            .first()
            .map(|attached| attached.owner)
    }

    //--- Removal ----------------------------------------------------------

    /// Removes the first component of type `C`. Returns whether one was removed.
    pub fn remove_component<C: Component>(&mut self) -> bool {
        let key = TypeId::of::<C>();
        let Some(set) = self.components.get_mut(&key) else {
            return false;
        };

        if set.is_empty() {
            self.components.remove(&key);
            return false;
        }

        set.remove(0);
        if set.is_empty() {
            self.components.remove(&key);
        }
        true
    }

    /// Removes all components of type `C`. Returns whether any were removed.
    pub fn remove_components<C: Component>(&mut self) -> bool {
        self.components
            .remove(&TypeId::of::<C>())
            .is_some_and(|set| !set.is_empty())
    }

    //--- Lifecycle --------------------------------------------------------

    /// Starts every attached component, in stable type order.
    pub fn start(&mut self) {
        for attached in self.components.values_mut().flatten() {
            attached.component.start();
        }
    }

    /// Ticks every attached component, in stable type order.
    pub fn tick(&mut self, dt: f32) {
        for attached in self.components.values_mut().flatten() {
            attached.component.tick(dt);
        }
    }
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("components", &self.component_count())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec4;

    use crate::core::object::SpriteRenderer;

    //--- Test Helpers -----------------------------------------------------

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        log: Log,
    }

    impl Component for Recorder {
        fn start(&mut self) {
            self.log.borrow_mut().push(format!("start:{}", self.label));
        }

        fn tick(&mut self, dt: f32) {
            self.log.borrow_mut().push(format!("tick:{}:{}", self.label, dt));
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Marker;

    impl Component for Marker {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn recorder(label: &'static str, log: &Log) -> Recorder {
        Recorder { label, log: Rc::clone(log) }
    }

    //=====================================================================
    // Attachment & Lookup
    //=====================================================================

    #[test]
    fn add_records_owner() {
        let mut object = GameObject::new("player");
        object.add_component(SpriteRenderer::new(Vec4::ONE));

        assert_eq!(object.component_owner::<SpriteRenderer>(), Some(object.id()));
    }

    #[test]
    fn same_type_components_are_kept() {
        let log = Log::default();
        let mut object = GameObject::new("multi");
        object
            .add_component(recorder("a", &log))
            .add_component(recorder("b", &log))
            .add_component(Marker);

        assert_eq!(object.get_components::<Recorder>().len(), 2);
        assert_eq!(object.component_count(), 3);
        assert_eq!(object.get_component::<Recorder>().map(|p| p.label), Some("a"));
    }

    #[test]
    fn boxed_components_are_keyed_by_concrete_type() {
        let mut object = GameObject::new("boxed");
        object.add_components(vec![
            Box::new(Marker) as Box<dyn Component>,
            Box::new(SpriteRenderer::new(Vec4::ZERO)),
        ]);

        assert!(object.get_component::<Marker>().is_some());
        assert!(object.get_component::<SpriteRenderer>().is_some());
    }

    #[test]
    fn missing_lookups_are_empty() {
        let object = GameObject::new("empty");

        assert!(object.get_component::<SpriteRenderer>().is_none());
        assert!(object.get_components::<SpriteRenderer>().is_empty());
        assert!(object.component_owner::<SpriteRenderer>().is_none());
    }

    #[test]
    fn get_component_mut_edits_in_place() {
        let mut object = GameObject::new("tinted");
        object.add_component(SpriteRenderer::new(Vec4::ONE));

        if let Some(sprite) = object.get_component_mut::<SpriteRenderer>() {
            sprite.set_color(Vec4::ZERO);
        }

        assert_eq!(object.get_component::<SpriteRenderer>().map(|s| s.color()), Some(Vec4::ZERO));
    }

    //=====================================================================
    // Removal
    //=====================================================================

    #[test]
    fn remove_component_takes_first_only() {
        let log = Log::default();
        let mut object = GameObject::new("multi");
        object.add_component(recorder("a", &log)).add_component(recorder("b", &log));

        assert!(object.remove_component::<Recorder>());
        assert_eq!(object.get_components::<Recorder>().len(), 1);
        assert_eq!(object.get_component::<Recorder>().map(|p| p.label), Some("b"));

        assert!(object.remove_component::<Recorder>());
        assert!(!object.remove_component::<Recorder>());
        assert_eq!(object.component_count(), 0);
    }

    #[test]
    fn remove_components_takes_all() {
        let log = Log::default();
        let mut object = GameObject::new("multi");
        object
            .add_component(recorder("a", &log))
            .add_component(recorder("b", &log))
            .add_component(Marker);

        assert!(object.remove_components::<Recorder>());
        assert!(object.get_components::<Recorder>().is_empty());
        assert!(object.get_component::<Marker>().is_some());
    }

    #[test]
    fn removing_absent_type_returns_false() {
        let mut object = GameObject::new("empty");

        assert!(!object.remove_component::<Marker>());
        assert!(!object.remove_components::<Marker>());
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn start_and_tick_reach_every_component() {
        let log = Log::default();
        let mut object = GameObject::new("recorded");
        object.add_component(recorder("a", &log)).add_component(recorder("b", &log));

        object.start();
        object.tick(0.5);

        let entries = log.borrow();
        assert_eq!(
            *entries,
            vec!["start:a", "start:b", "tick:a:0.5", "tick:b:0.5"]
        );
    }

    #[test]
    fn tick_order_is_stable_across_calls() {
        let log = Log::default();
        let mut object = GameObject::new("recorded");
        object
            .add_component(recorder("x", &log))
            .add_component(Marker)
            .add_component(recorder("y", &log));

        object.tick(1.0);
        let first: Vec<String> = log.borrow_mut().drain(..).collect();
        object.tick(1.0);
        let second: Vec<String> = log.borrow_mut().drain(..).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn object_ids_are_unique() {
        let a = GameObject::new("a");
        let b = GameObject::new("b");
        assert_ne!(a.id(), b.id());
    }
}
