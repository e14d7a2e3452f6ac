pub mod brewer_filter;
