pub mod quarter;
