mod add;
mod mat_mul;
mod new;
