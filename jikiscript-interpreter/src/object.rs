//! Native bridge: host-defined classes and instances.
//!
//! Hosts expose domain objects (a game board, a robot, a drawing canvas)
//! to JikiScript code by building a [`Class`] with named getters and
//! methods, then injecting an [`Instance`] of it as a context variable.
//! Script code interacts with instances through member access and method
//! calls only; the underlying state is opaque to the language.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use crate::execution::ExecutionContext;
use crate::value::Value;

/// Whether a member is reachable from script code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Reachable from script member access and method calls
    Public,
    /// Host-only; script access reports the member as missing
    Private,
}

/// Callback for a property getter
pub type GetterFn = Rc<dyn Fn(&mut ExecutionContext, &Instance) -> Value>;

/// Callback for a method. Returning `None` makes the call void: usable as
/// a statement, an error in expression position.
pub type MethodFn = Rc<dyn Fn(&mut ExecutionContext, &Instance, &[Value]) -> Option<Value>>;

/// A named, read-only property on a class
#[derive(Clone)]
pub struct Getter {
    pub name: String,
    pub visibility: Visibility,
    callback: GetterFn,
}

impl Getter {
    pub fn invoke(&self, context: &mut ExecutionContext, instance: &Instance) -> Value {
        (self.callback)(context, instance)
    }
}

/// A named method on a class with a human-readable description.
///
/// The description is used as the frame caption when the method is called,
/// e.g. "moved the character forward".
#[derive(Clone)]
pub struct Method {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    callback: MethodFn,
}

impl Method {
    pub fn invoke(
        &self,
        context: &mut ExecutionContext,
        instance: &Instance,
        arguments: &[Value],
    ) -> Option<Value> {
        (self.callback)(context, instance, arguments)
    }
}

/// A host-defined class: a name plus its getters and methods
pub struct Class {
    name: String,
    getters: HashMap<String, Getter>,
    methods: HashMap<String, Method>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Class {
            name: name.into(),
            getters: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a property getter. Registering the same name twice
    /// replaces the earlier definition.
    pub fn add_getter(
        &mut self,
        name: impl Into<String>,
        visibility: Visibility,
        callback: impl Fn(&mut ExecutionContext, &Instance) -> Value + 'static,
    ) {
        let name = name.into();
        self.getters.insert(
            name.clone(),
            Getter {
                name,
                visibility,
                callback: Rc::new(callback),
            },
        );
    }

    /// Register a method. Registering the same name twice replaces the
    /// earlier definition.
    pub fn add_method(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        visibility: Visibility,
        callback: impl Fn(&mut ExecutionContext, &Instance, &[Value]) -> Option<Value> + 'static,
    ) {
        let name = name.into();
        self.methods.insert(
            name.clone(),
            Method {
                name,
                description: description.into(),
                visibility,
                callback: Rc::new(callback),
            },
        );
    }

    pub fn getter(&self, name: &str) -> Option<&Getter> {
        self.getters.get(name)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }
}

impl std::fmt::Debug for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("getters", &self.getters.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// An instance of a host-defined class.
///
/// State is interior-mutable so that script-driven method calls can mutate
/// it through the shared handle the host keeps.
pub struct Instance {
    class: Rc<Class>,
    state: RefCell<Box<dyn Any>>,
}

impl Instance {
    pub fn new(class: Rc<Class>, state: impl Any) -> Rc<Instance> {
        Rc::new(Instance {
            class,
            state: RefCell::new(Box::new(state)),
        })
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub(crate) fn class_rc(&self) -> Rc<Class> {
        Rc::clone(&self.class)
    }

    /// Borrow the instance state, downcast to the host's state type.
    /// Returns `None` if the state is of a different type.
    pub fn state<T: Any>(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.state.borrow(), |state| state.downcast_ref::<T>()).ok()
    }

    /// Mutably borrow the instance state, downcast to the host's state type
    pub fn state_mut<T: Any>(&self) -> Option<RefMut<'_, T>> {
        RefMut::filter_map(self.state.borrow_mut(), |state| state.downcast_mut::<T>()).ok()
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name)
            .finish()
    }
}
