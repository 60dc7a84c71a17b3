//! Scene graph behaviour tests spanning several operations

mod ownership;
