/*! macOS window system adapter.

Uses `CGWindowListCopyWindowInfo` for snapshots and the accessibility
API (system-wide element -> focused application -> focused window) for
the focus probe. All CF/AX parsing lives here; the rest of the crate
only sees [`WindowInfo`] and [`Bounds`].
*/

#![allow(unsafe_code)]
#![allow(
  clippy::cast_possible_truncation,
  clippy::cast_sign_loss,
  clippy::cast_possible_wrap
)]

use std::ffi::c_void;
use std::ptr::NonNull;

use objc2_application_services::{
  AXError, AXIsProcessTrusted, AXUIElement, AXValue, AXValueType,
};
use objc2_core_foundation::{
  CFArray, CFDictionary, CFNumber, CFNumberType, CFRetained, CFString, CFType, CGPoint, CGRect,
  CGSize,
};
use objc2_core_graphics::{
  kCGNullWindowID, CGRectMakeWithDictionaryRepresentation, CGWindowListCopyWindowInfo,
  CGWindowListOption,
};

use super::WindowSystem;
use crate::types::{Bounds, ProcessId, WindowId, WindowInfo};

/// Window system backed by the macOS window server and accessibility API.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacosWindowSystem;

impl MacosWindowSystem {
  /// Create the adapter. Stateless; every query goes straight to the OS.
  pub const fn new() -> Self {
    Self
  }
}

impl WindowSystem for MacosWindowSystem {
  fn query_snapshot(&self) -> Vec<WindowInfo> {
    // Wrap in an autorelease pool to prevent memory leaks.
    objc2::rc::autoreleasepool(|_pool| snapshot_inner())
  }

  fn query_focused_frame(&self) -> Option<Bounds> {
    objc2::rc::autoreleasepool(|_pool| focused_frame_inner())
  }

  fn has_permissions(&self) -> bool {
    unsafe { AXIsProcessTrusted() }
  }
}

/// Enumerate on-screen windows, frontmost first.
///
/// No policy here: every window the server reports (any layer, any size)
/// is passed through. Filtering is owned by the tracking core.
fn snapshot_inner() -> Vec<WindowInfo> {
  let option = CGWindowListOption::OptionOnScreenOnly | CGWindowListOption::ExcludeDesktopElements;

  let Some(window_list_info) = CGWindowListCopyWindowInfo(option, kCGNullWindowID) else {
    log::debug!("CGWindowListCopyWindowInfo returned nothing");
    return Vec::new();
  };

  let count = CFArray::count(&window_list_info);
  let mut windows = Vec::with_capacity(count as usize);

  for idx in 0..count {
    let dict_ref =
      unsafe { CFArray::value_at_index(&window_list_info, idx).cast::<CFDictionary>() };
    let Some(dict) = retain_dictionary(dict_ref) else {
      continue;
    };

    let Some(id) = get_number(&dict, "kCGWindowNumber") else {
      continue;
    };
    let Some(pid) = get_number(&dict, "kCGWindowOwnerPID") else {
      continue;
    };
    let Some(bounds) = get_window_bounds(&dict) else {
      continue;
    };

    let layer = get_number(&dict, "kCGWindowLayer").unwrap_or(0);
    let owner_name = get_string(&dict, "kCGWindowOwnerName").unwrap_or_default();
    let title = get_string(&dict, "kCGWindowName");

    windows.push(WindowInfo {
      id: WindowId(id as u32),
      title,
      owner_name,
      process_id: ProcessId(pid as u32),
      bounds,
      layer,
    });
  }

  windows
}

/// Resolve the frame of the focused window via the accessibility chain.
///
/// Any unresolved link (no focused app, no focused window, missing
/// position/size) yields None; the tracker treats that as "no update".
fn focused_frame_inner() -> Option<Bounds> {
  let system_wide = unsafe { AXUIElement::new_system_wide() };
  let app = copy_element_attr(&system_wide, "AXFocusedApplication")?;
  let window = copy_element_attr(&app, "AXFocusedWindow")?;

  let pos = copy_raw_attr(&window, "AXPosition")?;
  let sz = copy_raw_attr(&window, "AXSize")?;
  parse_bounds(&pos, &sz)
}

/// Copy an AX attribute value, retained.
fn copy_raw_attr(element: &AXUIElement, attr: &str) -> Option<CFRetained<CFType>> {
  let attr = CFString::from_str(attr);
  unsafe {
    let mut value: *const CFType = std::ptr::null();
    let result = element.copy_attribute_value(&attr, NonNull::new(&raw mut value)?);
    if result != AXError::Success || value.is_null() {
      return None;
    }
    Some(CFRetained::from_raw(NonNull::new_unchecked(
      value.cast_mut(),
    )))
  }
}

/// Copy an AX attribute that holds another element.
fn copy_element_attr(element: &AXUIElement, attr: &str) -> Option<CFRetained<AXUIElement>> {
  copy_raw_attr(element, attr)?.downcast::<AXUIElement>().ok()
}

/// Decode an AXPosition/AXSize pair into screen-space bounds.
fn parse_bounds(position: &CFType, size: &CFType) -> Option<Bounds> {
  let pos = position.downcast_ref::<AXValue>()?;
  let sz = size.downcast_ref::<AXValue>()?;

  unsafe {
    if pos.r#type() != AXValueType::CGPoint || sz.r#type() != AXValueType::CGSize {
      return None;
    }
    let mut point = CGPoint { x: 0.0, y: 0.0 };
    let mut size_val = CGSize {
      width: 0.0,
      height: 0.0,
    };

    if !pos.value(
      AXValueType::CGPoint,
      NonNull::new((&raw mut point).cast::<c_void>())?,
    ) {
      return None;
    }
    if !sz.value(
      AXValueType::CGSize,
      NonNull::new((&raw mut size_val).cast::<c_void>())?,
    ) {
      return None;
    }

    Some(Bounds::new(point.x, point.y, size_val.width, size_val.height))
  }
}

/// Safely get a value from a `CFDictionary` by key.
fn dictionary_value<T>(dict: &CFDictionary, key: &str) -> Option<*const T> {
  let key = CFString::from_str(key);
  let key_ref = key.as_ref() as *const CFString;
  if unsafe { CFDictionary::contains_ptr_key(dict, key_ref.cast()) } {
    let value = unsafe { CFDictionary::value(dict, key_ref.cast()) };
    Some(value.cast::<T>())
  } else {
    None
  }
}

/// Extract an i32 number from a `CFDictionary`, if present.
fn get_number(dict: &CFDictionary, key: &str) -> Option<i32> {
  let number = dictionary_value::<CFNumber>(dict, key)?;
  unsafe {
    let mut value: i32 = 0;
    if CFNumber::value(
      &*number,
      CFNumberType::IntType,
      (&raw mut value).cast::<c_void>(),
    ) {
      Some(value)
    } else {
      None
    }
  }
}

/// Extract a non-empty string from a `CFDictionary`, if present.
fn get_string(dict: &CFDictionary, key: &str) -> Option<String> {
  let value = dictionary_value::<CFString>(dict, key)?;
  let s = unsafe { (*value).to_string() };
  if s.is_empty() {
    None
  } else {
    Some(s)
  }
}

/// Extract window bounds (`kCGWindowBounds` dictionary) as a `Bounds`.
fn get_window_bounds(dict: &CFDictionary) -> Option<Bounds> {
  let dict_rect = dictionary_value::<CFDictionary>(dict, "kCGWindowBounds")?;
  unsafe {
    let mut cg_rect = CGRect::default();
    if !dict_rect.is_null()
      && CGRectMakeWithDictionaryRepresentation(Some(&*dict_rect), &raw mut cg_rect)
    {
      Some(Bounds::new(
        cg_rect.origin.x,
        cg_rect.origin.y,
        cg_rect.size.width,
        cg_rect.size.height,
      ))
    } else {
      None
    }
  }
}

/// Retain a `CFDictionary` from a raw pointer.
fn retain_dictionary(ptr: *const CFDictionary) -> Option<CFRetained<CFDictionary>> {
  if ptr.is_null() {
    None
  } else {
    Some(unsafe { CFRetained::retain(NonNull::from(&*ptr)) })
  }
}
