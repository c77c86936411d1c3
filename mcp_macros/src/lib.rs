//! Procedural macros for `android_dev_mcp`

mod tool_description;
mod tool_fn;

use proc_macro::TokenStream;

/// Derives a `description()` method for tool enums that loads help text from files.
///
/// # Example
///
/// ```ignore
/// #[derive(ToolDescription)]
/// #[tool_description(path = "../../help_text")]
/// pub enum ToolName {
///     AndroidDevices,
///     AndroidShell,
/// }
/// ```
///
/// This will generate:
///
/// ```ignore
/// impl ToolName {
///     pub const fn description(&self) -> &'static str {
///         match self {
///             Self::AndroidDevices => include_str!("../../help_text/android-devices.txt").trim_ascii(),
///             Self::AndroidShell => include_str!("../../help_text/android-shell.txt").trim_ascii(),
///         }
///     }
/// }
/// ```
#[proc_macro_derive(ToolDescription, attributes(tool_description))]
pub fn derive_tool_description(input: TokenStream) -> TokenStream {
    tool_description::derive_tool_description_impl(input)
}

/// Implements `ToolFn` for a unit struct by forwarding to the `handle_impl` function
/// that lives next to it.
///
/// # Example
///
/// ```ignore
/// #[derive(ToolFn)]
/// #[tool_fn(params = "ShellParams")]
/// pub struct AndroidShell;
///
/// async fn handle_impl(ctx: HandlerContext, params: ShellParams) -> Result<ToolResponse> {
///     // ...
/// }
/// ```
///
/// `#[tool_fn(params = "...", preflight = "decide_early")]` also forwards
/// `ToolFn::preflight` to `fn decide_early(&HandlerContext) -> Option<Result<ToolResponse>>`.
#[proc_macro_derive(ToolFn, attributes(tool_fn))]
pub fn derive_tool_fn(input: TokenStream) -> TokenStream {
    tool_fn::derive_tool_fn_impl(input)
}
