/// One value per axis.
///
/// Used for the per-axis transforms of a record header.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector<T> {
    /// X
    pub x: T,
    /// Y
    pub y: T,
    /// Z
    pub z: T,
}

impl<T> Vector<T> {
    /// Creates a new vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::Vector;
    /// let vector = Vector::new(1, 2, 3);
    /// assert_eq!(2, vector.y);
    /// ```
    pub fn new(x: T, y: T, z: T) -> Vector<T> {
        Vector { x, y, z }
    }

    /// Creates a vector with the same value on every axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use las2g::Vector;
    /// assert_eq!(Vector::new(0.5, 0.5, 0.5), Vector::splat(0.5));
    /// ```
    pub fn splat(value: T) -> Vector<T>
    where
        T: Copy,
    {
        Vector::new(value, value, value)
    }
}
