//! Proc macros backing `progmem`'s formatted output.
//!
//! `write!(w, "CPS, {}", cps)` expands to a sequence of `NanoDisplay::fmt`
//! calls; every literal piece of the format string becomes a nul-terminated
//! static placed in AVR program memory and wrapped in a `PStr`. Only plain
//! `{}` placeholders are supported, there are no format specs.

use std::mem;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    parse::{Error, Parse, ParseStream, Result},
    parse_macro_input,
    punctuated::Punctuated,
    spanned::Spanned,
    Expr, Ident, LitByteStr, LitStr, Token,
};

struct WriteInput {
    sink: Expr,
    literal: LitStr,
    args: Vec<Expr>,
}

impl Parse for WriteInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let sink = input.parse()?;
        input.parse::<Token![,]>()?;
        let literal = input.parse()?;

        let args = if input.is_empty() {
            Vec::new()
        } else {
            input.parse::<Token![,]>()?;
            Punctuated::<Expr, Token![,]>::parse_terminated(input)?
                .into_iter()
                .collect()
        };

        Ok(Self {
            sink,
            literal,
            args,
        })
    }
}

/// One piece of a format string.
#[derive(Debug, PartialEq)]
enum Segment {
    /// Literal text, escapes resolved.
    Text(String),
    /// A `{}` placeholder.
    Arg,
}

fn scan(format: &str, span: Span) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                text.push('{');
            }
            '{' if chars.peek() == Some(&'}') => {
                chars.next();
                if !text.is_empty() {
                    segments.push(Segment::Text(mem::take(&mut text)));
                }
                segments.push(Segment::Arg);
            }
            '{' => {
                return Err(Error::new(
                    span,
                    "invalid format string: expected `{{` or `{}`",
                ));
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                text.push('}');
            }
            '}' => {
                return Err(Error::new(
                    span,
                    "format string contains an unmatched right brace",
                ));
            }
            c => text.push(c),
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    Ok(segments)
}

/// Emit a block evaluating to a `PStr` over a nul-terminated progmem static.
fn pstr_static(s: &str) -> proc_macro2::TokenStream {
    let mut bytes: Vec<u8> = s.bytes().collect();
    bytes.push(0);
    let size = bytes.len();
    let bytes = LitByteStr::new(&bytes, Span::call_site());

    quote!({
        #[cfg_attr(target_arch = "avr", unsafe(link_section = ".progmem.data"))]
        static __S: [u8; #size] = *#bytes;
        unsafe { progmem::PStr::new(__S.as_ptr()) }
    })
}

/// A string literal stored in program memory.
#[proc_macro]
#[allow(non_snake_case)]
pub fn P(input: TokenStream) -> TokenStream {
    let s = parse_macro_input!(input as LitStr);
    pstr_static(&s.value()).into()
}

/// Formatted output into a `NanoWrite` sink.
#[proc_macro]
pub fn write(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as WriteInput);
    let sink = &input.sink;

    let segments = match scan(&input.literal.value(), input.literal.span()) {
        Ok(segments) => segments,
        Err(e) => return e.to_compile_error().into(),
    };

    let required = segments.iter().filter(|s| **s == Segment::Arg).count();
    if input.args.len() < required {
        return Error::new(
            input.literal.span(),
            format!(
                "format string requires {} arguments but {} were supplied",
                required,
                input.args.len()
            ),
        )
        .to_compile_error()
        .into();
    }
    if input.args.len() > required {
        return Error::new(input.args[required].span(), "argument never used")
            .to_compile_error()
            .into();
    }

    let mut bindings = Vec::new();
    let mut values = Vec::new();
    let mut calls = Vec::new();
    let mut next = 0usize;

    for segment in segments {
        match segment {
            Segment::Text(s) => {
                let pstr = pstr_static(&s);
                calls.push(quote!(nano_fmt::NanoDisplay::fmt(#pstr, #sink);));
            }
            Segment::Arg => {
                let name = Ident::new(&format!("__arg{next}"), Span::call_site());
                values.push(input.args[next].clone());
                calls.push(quote!(nano_fmt::NanoDisplay::fmt(#name, #sink);));
                bindings.push(name);
                next += 1;
            }
        }
    }

    // Bind all arguments up front so each is evaluated exactly once.
    quote!(match (#(#values),*) {
        (#(#bindings),*) => {
            #(#calls)*
        }
    })
    .into()
}

#[cfg(test)]
mod tests {
    use proc_macro2::Span;

    use crate::Segment;

    fn scan(s: &str) -> Option<Vec<Segment>> {
        super::scan(s, Span::call_site()).ok()
    }

    #[test]
    fn plain_text_and_placeholder() {
        assert_eq!(
            scan("CPS, {}"),
            Some(vec![Segment::Text("CPS, ".to_string()), Segment::Arg]),
        );
    }

    #[test]
    fn adjacent_placeholders() {
        assert_eq!(scan("{}{}"), Some(vec![Segment::Arg, Segment::Arg]));
    }

    #[test]
    fn escaped_braces() {
        assert_eq!(
            scan("{{}} is not an argument"),
            Some(vec![Segment::Text("{} is not an argument".to_string())]),
        );
        assert_eq!(scan("}}"), Some(vec![Segment::Text("}".to_string())]));
    }

    #[test]
    fn format_specs_are_rejected() {
        assert!(scan("{:?}").is_none());
        assert!(scan("{:x}").is_none());
        assert!(scan("{ ").is_none());
        assert!(scan("{").is_none());
    }

    #[test]
    fn unmatched_right_brace_is_rejected() {
        assert!(scan("}").is_none());
        assert!(scan(" } ").is_none());
    }

    #[test]
    fn empty_format_string() {
        assert_eq!(scan(""), Some(vec![]));
    }
}
