use std::hash::{Hash, Hasher};
use std::rc::{self, Rc};
use std::sync::{self, Arc};

/// The identity of an element stored in a `HashTree`.
///
/// Elements may expire without being removed from the tree, e.g. when the tree only holds weak references to them. Expired
/// elements are dropped lazily while the tree is traversed.
pub trait ElementKey: Clone + Eq + Hash {
    fn is_alive(&self) -> bool;
}

macro_rules! impl_always_alive {
    ($($t:ty),*) => {
        $(
            impl ElementKey for $t {
                #[inline]
                fn is_alive(&self) -> bool {
                    true
                }
            }
        )*
    };
}

impl_always_alive!(u32, u64, usize, i32, i64);

/// A single-threaded weak reference that is identified by the address of its allocation.
pub struct WeakRef<T: ?Sized>(pub rc::Weak<T>);

impl<T> WeakRef<T> {
    #[inline]
    pub fn new(strong: &Rc<T>) -> Self {
        Self(Rc::downgrade(strong))
    }
}

impl<T: ?Sized> WeakRef<T> {
    #[inline]
    pub fn upgrade(&self) -> Option<Rc<T>> {
        self.0.upgrade()
    }
}

/// A thread-safe weak reference that is identified by the address of its allocation.
pub struct SyncWeakRef<T: ?Sized>(pub sync::Weak<T>);

impl<T> SyncWeakRef<T> {
    #[inline]
    pub fn new(strong: &Arc<T>) -> Self {
        Self(Arc::downgrade(strong))
    }
}

impl<T: ?Sized> SyncWeakRef<T> {
    #[inline]
    pub fn upgrade(&self) -> Option<Arc<T>> {
        self.0.upgrade()
    }
}

macro_rules! impl_weak_key {
    ($key:ident) => {
        impl<T: ?Sized> Clone for $key<T> {
            #[inline]
            fn clone(&self) -> Self {
                Self(self.0.clone())
            }
        }

        impl<T: ?Sized> PartialEq for $key<T> {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.0.ptr_eq(&other.0)
            }
        }

        impl<T: ?Sized> Eq for $key<T> {}

        impl<T: ?Sized> Hash for $key<T> {
            #[inline]
            fn hash<H: Hasher>(&self, state: &mut H) {
                (self.0.as_ptr() as *const () as usize).hash(state)
            }
        }

        impl<T: ?Sized> std::fmt::Debug for $key<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($key))
                    .field(&(self.0.as_ptr() as *const ()))
                    .finish()
            }
        }

        impl<T: ?Sized> ElementKey for $key<T> {
            #[inline]
            fn is_alive(&self) -> bool {
                self.0.strong_count() > 0
            }
        }
    };
}

impl_weak_key!(WeakRef);
impl_weak_key!(SyncWeakRef);

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn weak_refs_are_identified_by_allocation() {
        let a = Rc::new(5);
        let b = Rc::new(5);

        let mut set = HashSet::new();
        set.insert(WeakRef::new(&a));
        set.insert(WeakRef::new(&a));
        set.insert(WeakRef::new(&b));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&WeakRef::new(&b)));
        assert_ne!(WeakRef::new(&a), WeakRef::new(&b));
    }

    #[test]
    fn weak_refs_expire_with_last_strong_ref() {
        let a = Arc::new("canvas");
        let key = SyncWeakRef::new(&a);
        assert!(key.is_alive());
        assert_eq!(key.upgrade().as_deref(), Some(&"canvas"));

        drop(a);
        assert!(!key.is_alive());
        assert!(key.upgrade().is_none());
    }

    #[test]
    fn integer_ids_are_always_alive() {
        assert!(7u32.is_alive());
        assert!((-1i64).is_alive());
    }
}
