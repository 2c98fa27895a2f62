//! Token stream → executable plan.
//!
//! Two independent passes sit between the lexer and the executor: the
//! pipeline splitter (cuts on `|`) and the redirection parser (cuts argv
//! away from `>`/`>>`/`2>`/`2>>` targets), applied per stage.

pub mod pipeline;
pub mod redirection;

pub use pipeline::split_pipeline;
pub use redirection::{parse_stage, RedirectMode, Redirection, Stage};

use crate::errors::ParseError;

/// A full pipeline: one or more stages connected left-to-right.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

/// Split on `|` and parse redirections for every surviving stage.
///
/// Returns `Ok(None)` for a pipeline with no non-empty stages (the
/// evaluation is a no-op); an empty `argv` *within* a parsed stage is left
/// for the caller to decide how to handle (skip it, but in a pipeline close
/// its would-be upstream read end).
pub fn parse_pipeline(tokens: &[String]) -> Result<Option<Pipeline>, ParseError> {
    let segments = split_pipeline(tokens);
    if segments.is_empty() {
        return Ok(None);
    }

    let stages = segments
        .iter()
        .map(|segment| parse_stage(segment))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Pipeline { stages }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &[&str]) -> Vec<String> {
        s.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn non_pipeline_equivalent_to_single_stage() {
        let pipeline = parse_pipeline(&toks(&["echo", "foo", ">", "/tmp/x"]))
            .unwrap()
            .unwrap();
        assert_eq!(pipeline.stages.len(), 1);
        assert_eq!(pipeline.stages[0].argv, vec!["echo", "foo"]);
    }

    #[test]
    fn pipeline_with_redirection_on_last_stage() {
        let pipeline = parse_pipeline(&toks(&[
            "echo", "hi", "|", "tr", "h", "H", ">", "/tmp/out",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(pipeline.stages.len(), 2);
        assert_eq!(pipeline.stages[1].redirects[&1].target, "/tmp/out");
    }

    #[test]
    fn all_empty_segments_is_a_no_op() {
        assert!(parse_pipeline(&toks(&["|"])).unwrap().is_none());
        assert!(parse_pipeline(&[]).unwrap().is_none());
    }

    #[test]
    fn propagates_missing_target_error() {
        assert_eq!(
            parse_pipeline(&toks(&["echo", "|", "cat", ">"])),
            Err(ParseError::MissingRedirectionTarget)
        );
    }
}
