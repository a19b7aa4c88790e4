mod test_graph_kernel;
mod test_helpers;
mod test_validation;
