//! Native effect and transition vocabularies mapped onto the canonical model.

pub mod mapper;
pub mod transitions;
