mod classifiers;
mod common;
mod recommendation;
