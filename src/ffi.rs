//! FFI bindings for Lexiscale
//!
//! This module provides C-compatible functions for calling Lexiscale from other
//! languages. All functions use C strings (null-terminated) and return allocated
//! memory that must be freed by the caller using `lexiscale_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::pipeline::{analyze_to_json, ReadabilityEngine};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn range_to_json(min_grade: f64, max_grade: f64) -> String {
    serde_json::json!({ "min_grade": min_grade, "max_grade": max_grade }).to_string()
}

// ============================================================================
// Stateless API
// ============================================================================

/// Analyze text with the default configuration and return a JSON envelope.
///
/// # Safety
/// - `text` must be a valid null-terminated UTF-8 C string.
/// - Returns a newly allocated string that must be freed with `lexiscale_free_string`.
/// - Returns NULL on error; call `lexiscale_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn lexiscale_analyze(text: *const c_char) -> *mut c_char {
    clear_last_error();

    let text_str = match cstr_to_string(text) {
        Some(s) => s,
        None => {
            set_last_error("Invalid text string pointer");
            return ptr::null_mut();
        }
    };

    match analyze_to_json(&text_str) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Compute the target grade range for a tier and adjustment.
///
/// Unrecognized values fall back to `intermediate` / `appropriate`; a NULL
/// `adjustment` means `appropriate`.
///
/// # Safety
/// - `tier` must be a valid null-terminated C string.
/// - `adjustment` must be NULL or a valid null-terminated C string.
/// - Returns a newly allocated JSON object `{"min_grade", "max_grade"}` that
///   must be freed with `lexiscale_free_string`.
#[no_mangle]
pub unsafe extern "C" fn lexiscale_target_range(
    tier: *const c_char,
    adjustment: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let tier_str = match cstr_to_string(tier) {
        Some(s) => s,
        None => {
            set_last_error("Invalid tier string pointer");
            return ptr::null_mut();
        }
    };
    let adjustment_str = cstr_to_string(adjustment);

    let (min_grade, max_grade) =
        crate::pipeline::target_grade_range(&tier_str, adjustment_str.as_deref());
    string_to_cstr(&range_to_json(min_grade, max_grade))
}

// ============================================================================
// Configured Engine API
// ============================================================================

/// Opaque handle to a ReadabilityEngine
pub struct ReadabilityEngineHandle {
    engine: ReadabilityEngine,
}

/// Create an engine from a JSON config. NULL `config` uses the defaults.
///
/// # Safety
/// - `config` must be NULL or a valid null-terminated C string.
/// - Returns a pointer that must be freed with `lexiscale_engine_free`.
/// - Returns NULL on error; call `lexiscale_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn lexiscale_engine_new(config: *const c_char) -> *mut ReadabilityEngineHandle {
    clear_last_error();

    let engine = if config.is_null() {
        ReadabilityEngine::new()
    } else {
        let Some(json) = cstr_to_string(config) else {
            set_last_error("Invalid config string pointer");
            return ptr::null_mut();
        };
        match ReadabilityEngine::from_json_config(&json) {
            Ok(engine) => engine,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    Box::into_raw(Box::new(ReadabilityEngineHandle { engine }))
}

/// Free an engine.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `lexiscale_engine_new`.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn lexiscale_engine_free(engine: *mut ReadabilityEngineHandle) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Analyze text with a configured engine, enforcing its length cap.
///
/// # Safety
/// - `engine` must be a valid pointer returned by `lexiscale_engine_new`.
/// - `text` must be a valid null-terminated UTF-8 C string.
/// - Returns a newly allocated string that must be freed with `lexiscale_free_string`.
/// - Returns NULL on error; call `lexiscale_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn lexiscale_engine_analyze(
    engine: *const ReadabilityEngineHandle,
    text: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if engine.is_null() {
        set_last_error("Null engine pointer");
        return ptr::null_mut();
    }
    let handle = &*engine;

    let text_str = match cstr_to_string(text) {
        Some(s) => s,
        None => {
            set_last_error("Invalid text string pointer");
            return ptr::null_mut();
        }
    };

    let result = handle
        .engine
        .analyze_checked(&text_str)
        .and_then(|report| handle.engine.encode_to_json(&report));

    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Lexiscale.
///
/// # Safety
/// - `s` must be a pointer returned by a Lexiscale function, or NULL.
#[no_mangle]
pub unsafe extern "C" fn lexiscale_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a static string that is valid until the next Lexiscale call
///   on the same thread.
/// - Returns NULL if no error occurred.
/// - Do NOT free this pointer.
#[no_mangle]
pub unsafe extern "C" fn lexiscale_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take_string(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        let s = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        unsafe { lexiscale_free_string(ptr) };
        s
    }

    #[test]
    fn test_ffi_analyze() {
        let text = CString::new("The cat sat. The dog ran. I see a cat.").unwrap();
        let json = take_string(unsafe { lexiscale_analyze(text.as_ptr()) });
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(payload["report"]["sentence_count"], 3);
        assert_eq!(payload["metadata"]["difficulty_level"], "beginner");
    }

    #[test]
    fn test_ffi_null_text() {
        let result = unsafe { lexiscale_analyze(ptr::null()) };
        assert!(result.is_null());

        let error = unsafe { lexiscale_last_error() };
        assert!(!error.is_null());
        let message = unsafe { CStr::from_ptr(error) }.to_str().unwrap();
        assert!(message.contains("text"));
    }

    #[test]
    fn test_ffi_target_range() {
        let tier = CString::new("advanced").unwrap();
        let adjustment = CString::new("challenging").unwrap();
        let json = take_string(unsafe { lexiscale_target_range(tier.as_ptr(), adjustment.as_ptr()) });
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(payload["min_grade"], 11.0);
        assert_eq!(payload["max_grade"], 14.0);

        let unknown = CString::new("expert").unwrap();
        let json = take_string(unsafe { lexiscale_target_range(unknown.as_ptr(), ptr::null()) });
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(payload["min_grade"], 6.0);
        assert_eq!(payload["max_grade"], 8.0);
    }

    #[test]
    fn test_ffi_engine_lifecycle() {
        let config = CString::new(r#"{"max_text_chars": 8}"#).unwrap();
        let engine = unsafe { lexiscale_engine_new(config.as_ptr()) };
        assert!(!engine.is_null());

        let short = CString::new("Hi there").unwrap();
        let json = take_string(unsafe { lexiscale_engine_analyze(engine, short.as_ptr()) });
        assert!(json.contains("\"word_count\": 2"));

        let long = CString::new("This sentence is too long.").unwrap();
        let result = unsafe { lexiscale_engine_analyze(engine, long.as_ptr()) };
        assert!(result.is_null());
        let message = unsafe { CStr::from_ptr(lexiscale_last_error()) }
            .to_str()
            .unwrap()
            .to_string();
        assert!(message.contains("Text too long"));

        unsafe { lexiscale_engine_free(engine) };
    }

    #[test]
    fn test_ffi_engine_rejects_bad_config() {
        let config = CString::new(r#"{"words_per_minute": -5}"#).unwrap();
        let engine = unsafe { lexiscale_engine_new(config.as_ptr()) };
        assert!(engine.is_null());
        assert!(!unsafe { lexiscale_last_error() }.is_null());
    }
}
