//! # Hook Registry
//!
//! Hooks let host code intercept accesses to the address space without
//! patching the ROM it is running. There are three kinds:
//!
//! - **pre-read** ([`ReadHook`]): runs before a data read and may supply the
//!   byte the CPU sees instead of the stored one.
//! - **post-write** ([`WriteHook`]): runs after a byte has been committed and
//!   may react to it (including writing storage again).
//! - **pre-execute** ([`ExecuteHook`]): runs when the program counter lands on
//!   an address for an opcode fetch. It may rewrite registers; moving the
//!   program counter means the instruction at the original address is not
//!   executed. This is how host code replaces an OS entry point.
//!
//! Hooks are shared objects (`Rc<RefCell<_>>`). The registrant can keep its
//! own handle to inspect hook state later. The registry holds a strong
//! reference of its own: a registered hook stays live until its
//! [`HookHandle`] is passed to [`HookRegistry::remove`], even if the
//! registrant has dropped every other reference. Closure hooks built with
//! [`Hook::pre_read`] and friends have no other owner.
//!
//! Dispatch order is registration order. Hooks may register and remove hooks
//! while an access is being dispatched: a hook removed mid-dispatch does not
//! fire for that access, and a hook registered mid-dispatch first fires on
//! the next access.
//!
//! Closures with the matching signature implement the traits directly.

use crate::error::{AddressError, HookError};
use crate::memory::AddressSpace;
use crate::registers::Registers;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Result type returned by hook callbacks.
pub type HookResult<T> = Result<T, HookError>;

/// The three interception points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Before a data read
    PreRead,
    /// After a write has been committed
    PostWrite,
    /// Before an opcode fetch
    PreExecute,
}

impl HookKind {
    const fn index(self) -> usize {
        match self {
            HookKind::PreRead => 0,
            HookKind::PostWrite => 1,
            HookKind::PreExecute => 2,
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            HookKind::PreRead => "pre-read",
            HookKind::PostWrite => "post-write",
            HookKind::PreExecute => "pre-execute",
        };
        f.write_str(name)
    }
}

/// Which addresses a hook fires for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A single address
    Address(u16),
    /// An inclusive range; build with [`Trigger::range`]
    Range {
        /// First address covered
        first: u16,
        /// Last address covered
        last: u16,
    },
    /// Every address (for pre-execute hooks: every instruction)
    Any,
}

impl Trigger {
    /// Builds a trigger for the half-open range `[start, end)`.
    ///
    /// `end` may be 0x10000 to cover the top of memory.
    ///
    /// ```
    /// use beeb6502::Trigger;
    ///
    /// let rom = Trigger::range(0x8000, 0xC000).unwrap();
    /// assert!(rom.contains(0xBFFF));
    /// assert!(!rom.contains(0xC000));
    /// assert!(Trigger::range(0xC000, 0x10001).is_err());
    /// ```
    pub fn range(start: u32, end: u32) -> Result<Trigger, AddressError> {
        if end <= start {
            return Err(AddressError::EmptyRange { start, end });
        }
        let first = AddressError::check(start)?;
        let last = AddressError::check(end - 1)?;
        Ok(if first == last {
            Trigger::Address(first)
        } else {
            Trigger::Range { first, last }
        })
    }

    /// Whether `address` is covered.
    pub fn contains(&self, address: u16) -> bool {
        match *self {
            Trigger::Address(a) => a == address,
            Trigger::Range { first, last } => (first..=last).contains(&address),
            Trigger::Any => true,
        }
    }

    /// Inclusive page span touched, `None` for [`Trigger::Any`].
    fn pages(&self) -> Option<(usize, usize)> {
        match *self {
            Trigger::Address(a) => Some(((a >> 8) as usize, (a >> 8) as usize)),
            Trigger::Range { first, last } => Some(((first >> 8) as usize, (last >> 8) as usize)),
            Trigger::Any => None,
        }
    }
}

/// What a hook is told about a data access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    /// Address being accessed
    pub address: u16,
    /// Stored byte (reads) or byte just committed (writes)
    pub value: u8,
    /// Byte stored before the write; equal to `value` for reads
    pub previous: u8,
    /// Register file at the time of the access
    pub registers: Registers,
}

/// What a pre-execute hook is told, and may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteContext {
    /// Address about to be fetched
    pub address: u16,
    /// Opcode byte in storage there. Code served by pre-read hooks shows up
    /// through [`AddressSpace::observe`] instead.
    pub opcode: u8,
    /// Register file. Changes are applied to the CPU when the hook returns.
    pub registers: Registers,
}

/// Returned by a pre-execute hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecuteAction {
    /// Carry on (executing the instruction unless the PC was moved)
    #[default]
    Continue,
    /// Skip the instruction and ask the run loop to stop
    Stop,
}

/// Pre-read interceptor.
pub trait ReadHook {
    /// Returns `Some(byte)` to replace the value the read yields.
    fn pre_read(&mut self, memory: &mut AddressSpace, access: &Access) -> HookResult<Option<u8>>;
}

/// Post-write observer.
pub trait WriteHook {
    fn post_write(&mut self, memory: &mut AddressSpace, access: &Access) -> HookResult<()>;
}

/// Pre-execute interceptor.
pub trait ExecuteHook {
    fn pre_execute(
        &mut self,
        memory: &mut AddressSpace,
        context: &mut ExecuteContext,
    ) -> HookResult<ExecuteAction>;
}

impl<F> ReadHook for F
where
    F: FnMut(&mut AddressSpace, &Access) -> HookResult<Option<u8>>,
{
    fn pre_read(&mut self, memory: &mut AddressSpace, access: &Access) -> HookResult<Option<u8>> {
        self(memory, access)
    }
}

impl<F> WriteHook for F
where
    F: FnMut(&mut AddressSpace, &Access) -> HookResult<()>,
{
    fn post_write(&mut self, memory: &mut AddressSpace, access: &Access) -> HookResult<()> {
        self(memory, access)
    }
}

impl<F> ExecuteHook for F
where
    F: FnMut(&mut AddressSpace, &mut ExecuteContext) -> HookResult<ExecuteAction>,
{
    fn pre_execute(
        &mut self,
        memory: &mut AddressSpace,
        context: &mut ExecuteContext,
    ) -> HookResult<ExecuteAction> {
        self(memory, context)
    }
}

/// A registered callback, tagged by kind.
#[derive(Clone)]
pub enum Hook {
    PreRead(Rc<RefCell<dyn ReadHook>>),
    PostWrite(Rc<RefCell<dyn WriteHook>>),
    PreExecute(Rc<RefCell<dyn ExecuteHook>>),
}

impl Hook {
    /// Wraps a pre-read hook (or closure).
    pub fn pre_read<H: ReadHook + 'static>(hook: H) -> Self {
        Hook::PreRead(Rc::new(RefCell::new(hook)))
    }

    /// Wraps a post-write hook (or closure).
    pub fn post_write<H: WriteHook + 'static>(hook: H) -> Self {
        Hook::PostWrite(Rc::new(RefCell::new(hook)))
    }

    /// Wraps a pre-execute hook (or closure).
    pub fn pre_execute<H: ExecuteHook + 'static>(hook: H) -> Self {
        Hook::PreExecute(Rc::new(RefCell::new(hook)))
    }

    pub fn kind(&self) -> HookKind {
        match self {
            Hook::PreRead(_) => HookKind::PreRead,
            Hook::PostWrite(_) => HookKind::PostWrite,
            Hook::PreExecute(_) => HookKind::PreExecute,
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Hook::{}", self.kind())
    }
}

/// Identifies a registration for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookHandle(u64);

struct Registration {
    handle: HookHandle,
    trigger: Trigger,
    hook: Hook,
}

/// Resumable position in one dispatch pass.
///
/// Handles grow monotonically and entries stay in registration order, so a
/// pass can be resumed by handle after the registry has changed under it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DispatchCursor {
    next: u64,
    end: u64,
}

/// Ordered store of hook registrations.
///
/// Keeps, per hook kind, a count of registrations touching each 256-byte
/// page so the common unhooked access is a single array lookup.
pub struct HookRegistry {
    entries: Vec<Registration>,
    next_handle: u64,
    page_counts: [[u32; 256]; 3],
    any_counts: [u32; 3],
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
            page_counts: [[0; 256]; 3],
            any_counts: [0; 3],
        }
    }

    /// Adds a hook after every existing one.
    pub fn register(&mut self, trigger: Trigger, hook: Hook) -> HookHandle {
        let handle = HookHandle(self.next_handle);
        self.next_handle += 1;
        self.adjust_counts(hook.kind(), &trigger, true);
        self.entries.push(Registration {
            handle,
            trigger,
            hook,
        });
        handle
    }

    /// Removes a registration, returning its hook.
    pub fn remove(&mut self, handle: HookHandle) -> Option<Hook> {
        let index = self.position(handle)?;
        let registration = self.entries.remove(index);
        self.adjust_counts(registration.hook.kind(), &registration.trigger, false);
        Some(registration.hook)
    }

    /// Whether `handle` is still registered.
    pub fn contains(&self, handle: HookHandle) -> bool {
        self.position(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cheap pre-check: could any hook of `kind` cover `address`?
    #[inline]
    pub fn may_match(&self, kind: HookKind, address: u16) -> bool {
        let k = kind.index();
        self.any_counts[k] != 0 || self.page_counts[k][(address >> 8) as usize] != 0
    }

    /// Snapshot of the hooks of `kind` covering `address`, in registration
    /// order.
    pub fn matching(&self, kind: HookKind, address: u16) -> Vec<Hook> {
        self.entries
            .iter()
            .filter(|r| r.hook.kind() == kind && r.trigger.contains(address))
            .map(|r| r.hook.clone())
            .collect()
    }

    /// Starts a dispatch pass over the hooks registered so far.
    pub(crate) fn cursor(&self) -> DispatchCursor {
        DispatchCursor {
            next: 0,
            end: self.next_handle,
        }
    }

    /// Next hook of `kind` covering `address` still registered past `cursor`.
    pub(crate) fn next_matching(
        &self,
        kind: HookKind,
        address: u16,
        cursor: &mut DispatchCursor,
    ) -> Option<Hook> {
        let start = self.entries.partition_point(|r| r.handle.0 < cursor.next);
        let found = self.entries[start..]
            .iter()
            .take_while(|r| r.handle.0 < cursor.end)
            .find(|r| r.hook.kind() == kind && r.trigger.contains(address));
        match found {
            Some(r) => {
                cursor.next = r.handle.0 + 1;
                Some(r.hook.clone())
            }
            None => {
                cursor.next = cursor.end;
                None
            }
        }
    }

    /// Whether a registered hook of `kind` covers `address`.
    pub(crate) fn covers(&self, kind: HookKind, address: u16) -> bool {
        self.may_match(kind, address)
            && self
                .entries
                .iter()
                .any(|r| r.hook.kind() == kind && r.trigger.contains(address))
    }

    fn position(&self, handle: HookHandle) -> Option<usize> {
        self.entries.binary_search_by_key(&handle, |r| r.handle).ok()
    }

    fn adjust_counts(&mut self, kind: HookKind, trigger: &Trigger, add: bool) {
        let k = kind.index();
        let bump = |count: &mut u32| {
            if add {
                *count += 1;
            } else {
                *count -= 1;
            }
        };
        match trigger.pages() {
            None => bump(&mut self.any_counts[k]),
            Some((first, last)) => self.page_counts[k][first..=last].iter_mut().for_each(bump),
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
